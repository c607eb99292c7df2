//! Gmail inbox probe — one-shot diagnostic binary.
//!
//! Loads a saved OAuth credential from `token.json`, registers an inbox
//! watch routed to a Cloud Pub/Sub topic, then dumps a history page and a
//! single message from the Gmail API as indented JSON.

mod config;
mod credentials;
mod gmail_api;
mod output;
mod probe;
#[cfg(test)]
mod test_support;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = config::Config::from_env();

    if let Err(e) = probe::run(&config).await {
        log::error!("[GMAIL] Probe failed: {}", e);
        std::process::exit(1);
    }
}
