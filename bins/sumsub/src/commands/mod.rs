//! CLI command implementations

pub mod access_token;
pub mod applicant;
pub mod sign;

use owo_colors::OwoColorize;
use sumsub_api_client::{ClientConfig, SumsubClient};

const RULE: &str =
    "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Print a section banner
pub fn header(title: &str) {
    println!();
    println!("{}", RULE.blue());
    println!("  {}", title.blue().bold());
    println!("{}", RULE.blue());
    println!();
}

/// Build a client from the environment, logging only whether credentials were found
pub fn client_from_env() -> anyhow::Result<SumsubClient> {
    let config = ClientConfig::from_env()?;
    tracing::debug!(
        base_url = %config.base_url(),
        app_token_present = true,
        secret_key_present = true,
        "Loaded API credentials"
    );
    Ok(SumsubClient::with_config(config)?)
}

/// Print one `label: value` row
pub fn row(label: &str, value: impl std::fmt::Display) {
    println!("  {:<16} {}", format!("{label}:").dimmed(), value);
}
