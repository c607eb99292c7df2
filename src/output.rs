//! Console output helper.

use serde::Serialize;
use serde_json::Value;

/// Render a raw API response with a four-space indent, the format the
/// downstream inspection tooling expects.
pub fn to_pretty_json(value: &Value) -> String {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .expect("serializing a JSON value cannot fail");
    String::from_utf8(buf).expect("serde_json emits valid UTF-8")
}

/// Print a raw API response to stdout.
pub fn print_json(value: &Value) {
    println!("{}", to_pretty_json(value));
}
