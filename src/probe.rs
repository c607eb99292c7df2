//! One-shot probe sequence: credentials, watch registration, history page,
//! single message. Strictly sequential; the first failure aborts the run.

use crate::config::Config;
use crate::credentials;
use crate::gmail_api::{GmailClient, WatchRequest};
use crate::output;

pub async fn run(config: &Config) -> Result<(), String> {
    // The loader itself never fails; absence is surfaced here, before the
    // first network call, instead of as a confusing 401 downstream.
    let Some(creds) = credentials::load_saved_credentials(&config.token_path) else {
        return Err(format!(
            "no usable credentials at {} (run the OAuth bootstrap first)",
            config.token_path.display()
        ));
    };

    let http = reqwest::Client::new();

    log::info!("[GMAIL] Exchanging refresh token for an access token");
    let token = credentials::exchange_refresh_token(&http, &config.token_url, &creds).await?;

    let gmail = GmailClient::new(http, config.api_base_url.clone(), token.access_token);

    let watch_request = WatchRequest {
        label_ids: config.label_ids.clone(),
        topic_name: config.topic_name.clone(),
    };
    log::info!(
        "[GMAIL] Registering watch on {:?} -> {}",
        config.label_ids,
        config.topic_name
    );
    let watch_response = gmail.watch(&watch_request).await?;
    log_watch_details(&watch_response);
    output::print_json(&watch_response);

    log::info!(
        "[GMAIL] Listing history from cursor {}",
        config.start_history_id
    );
    let history = gmail.list_history(config.start_history_id).await?;
    output::print_json(&history);

    log::info!("[GMAIL] Fetching message {}", config.message_id);
    let message = gmail.get_message(&config.message_id).await?;
    output::print_json(&message);

    Ok(())
}

/// The watch response carries the new cursor and an expiration in epoch
/// milliseconds; render the expiration as a readable timestamp.
fn log_watch_details(response: &serde_json::Value) {
    let history_id = response
        .get("historyId")
        .and_then(|v| v.as_str())
        .unwrap_or("?");
    let expiration = response
        .get("expiration")
        .and_then(|v| v.as_str())
        .and_then(|v| v.parse::<i64>().ok())
        .and_then(chrono::DateTime::from_timestamp_millis);

    match expiration {
        Some(at) => log::info!(
            "[GMAIL] Watch registered (history id {}, expires {})",
            history_id,
            at.to_rfc3339()
        ),
        None => log::info!("[GMAIL] Watch registered (history id {})", history_id),
    }
}
