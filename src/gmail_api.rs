//! Gmail REST API client.
//!
//! Covers the three operations the probe exercises, all under user scope
//! `me`: watch registration, history listing and single-message fetch.
//! Responses are returned as raw JSON for printing.

use serde::Serialize;
use serde_json::Value;

/// Inbox watch registration request, camelCase on the wire.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchRequest {
    pub label_ids: Vec<String>,
    pub topic_name: String,
}

pub struct GmailClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl GmailClient {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        }
    }

    /// Register a push subscription: mailbox changes matching the label
    /// filter get published to the request's Pub/Sub topic.
    pub async fn watch(&self, request: &WatchRequest) -> Result<Value, String> {
        let url = format!("{}/gmail/v1/users/me/watch", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(request)
            .send()
            .await
            .map_err(|e| format!("Gmail watch request failed: {}", e))?;
        read_json("watch", response).await
    }

    /// List mailbox changes from a history cursor onward. Single page only.
    pub async fn list_history(&self, start_history_id: u64) -> Result<Value, String> {
        let url = format!("{}/gmail/v1/users/me/history", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("startHistoryId", start_history_id.to_string())])
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| format!("Gmail history request failed: {}", e))?;
        read_json("history.list", response).await
    }

    /// Fetch one message by id.
    pub async fn get_message(&self, message_id: &str) -> Result<Value, String> {
        let url = format!("{}/gmail/v1/users/me/messages/{}", self.base_url, message_id);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| format!("Gmail message request failed: {}", e))?;
        read_json("messages.get", response).await
    }
}

async fn read_json(op: &str, response: reqwest::Response) -> Result<Value, String> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| format!("Failed to read {} response: {}", op, e))?;

    if !status.is_success() {
        return Err(format!(
            "Gmail {} error ({}): {}",
            op,
            status,
            truncate_error(&body)
        ));
    }

    serde_json::from_str(&body).map_err(|e| format!("Invalid JSON in {} response: {}", op, e))
}

fn truncate_error(s: &str) -> &str {
    if s.len() > 200 {
        &s[..200]
    } else {
        s
    }
}
