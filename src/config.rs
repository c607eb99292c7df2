//! Runtime configuration for the probe.
//!
//! Every literal the original runbook baked in stays available as a default,
//! overridable through environment variables (loaded via `dotenv` in main).

use std::path::PathBuf;

pub const DEFAULT_TOKEN_PATH: &str = "token.json";
pub const DEFAULT_TOPIC_NAME: &str = "projects/servcy/topics/ServcyGmailInbox";
pub const DEFAULT_LABEL_ID: &str = "INBOX";
pub const DEFAULT_START_HISTORY_ID: u64 = 8631681;
pub const DEFAULT_MESSAGE_ID: &str = "18510ea757da1719";
pub const DEFAULT_GMAIL_API_BASE_URL: &str = "https://gmail.googleapis.com";
pub const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the saved OAuth credential file.
    pub token_path: PathBuf,
    /// Fully qualified Pub/Sub topic the watch routes notifications to.
    pub topic_name: String,
    /// Mailbox labels the watch is scoped to.
    pub label_ids: Vec<String>,
    /// Change-log cursor the history listing starts from.
    pub start_history_id: u64,
    /// Message fetched by the single-message probe.
    pub message_id: String,
    pub api_base_url: String,
    pub token_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token_path: PathBuf::from(DEFAULT_TOKEN_PATH),
            topic_name: DEFAULT_TOPIC_NAME.to_string(),
            label_ids: vec![DEFAULT_LABEL_ID.to_string()],
            start_history_id: DEFAULT_START_HISTORY_ID,
            message_id: DEFAULT_MESSAGE_ID.to_string(),
            api_base_url: DEFAULT_GMAIL_API_BASE_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            token_path: std::env::var("GMAIL_TOKEN_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.token_path),
            topic_name: std::env::var("GMAIL_TOPIC_NAME").unwrap_or(defaults.topic_name),
            label_ids: std::env::var("GMAIL_LABEL_IDS")
                .ok()
                .map(|raw| parse_label_ids(&raw))
                .filter(|ids| !ids.is_empty())
                .unwrap_or(defaults.label_ids),
            start_history_id: std::env::var("GMAIL_START_HISTORY_ID")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.start_history_id),
            message_id: std::env::var("GMAIL_MESSAGE_ID").unwrap_or(defaults.message_id),
            api_base_url: std::env::var("GMAIL_API_BASE_URL").unwrap_or(defaults.api_base_url),
            token_url: std::env::var("GOOGLE_OAUTH_TOKEN_URL").unwrap_or(defaults.token_url),
        }
    }
}

fn parse_label_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
