//! Saved OAuth credential loading and access-token exchange.
//!
//! The credential file holds "authorized user" material (client id/secret
//! plus a refresh token); a bearer access token is minted from it at the
//! Google OAuth token endpoint before any Gmail call is made.

use serde::Deserialize;
use std::path::Path;

/// Saved "authorized user" credential, the shape `token.json` carries.
#[derive(Debug, Clone, Deserialize)]
pub struct SavedCredentials {
    #[serde(rename = "type", default)]
    pub credential_type: String,
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

/// Short-lived bearer token minted from the refresh token.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Read and parse the credential file. Any failure (missing file, unreadable,
/// malformed JSON, missing fields) yields `None`; the caller decides whether
/// absence is fatal.
pub fn load_saved_credentials(path: &Path) -> Option<SavedCredentials> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            log::warn!(
                "[GMAIL] Could not read credential file {}: {}",
                path.display(),
                e
            );
            return None;
        }
    };

    match serde_json::from_str(&content) {
        Ok(creds) => Some(creds),
        Err(e) => {
            log::warn!(
                "[GMAIL] Credential file {} is not a valid saved credential: {}",
                path.display(),
                e
            );
            None
        }
    }
}

/// Exchange the refresh token for a bearer access token.
pub async fn exchange_refresh_token(
    client: &reqwest::Client,
    token_url: &str,
    creds: &SavedCredentials,
) -> Result<AccessToken, String> {
    let params = [
        ("client_id", creds.client_id.as_str()),
        ("client_secret", creds.client_secret.as_str()),
        ("refresh_token", creds.refresh_token.as_str()),
        ("grant_type", "refresh_token"),
    ];

    let response = client
        .post(token_url)
        .form(&params)
        .send()
        .await
        .map_err(|e| format!("Token exchange request failed: {}", e))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| format!("Failed to read token response: {}", e))?;

    let json: serde_json::Value = serde_json::from_str(&body)
        .map_err(|e| format!("Invalid JSON in token response ({}): {}", status, e))?;

    // OAuth errors come back as {"error": ..., "error_description": ...}
    if let Some(error) = json.get("error") {
        let detail = json
            .get("error_description")
            .and_then(|d| d.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return Err(format!("Error refreshing tokens from Google: {}", detail));
    }

    if !status.is_success() {
        return Err(format!("Token endpoint error ({}): {}", status, body));
    }

    serde_json::from_value(json).map_err(|e| format!("Failed to parse token response: {}", e))
}
