//! `access-token` command

use super::{client_from_env, header, row};
use crate::OutputFormat;
use anyhow::Result;
use owo_colors::OwoColorize;
use sumsub_api_client::endpoints::access_tokens::random_user_id;

/// Create an SDK access token, generating a user id when none is given
pub async fn run(
    user_id: Option<String>,
    level: &str,
    ttl: u32,
    format: OutputFormat,
) -> Result<()> {
    let client = client_from_env()?;
    let user_id = user_id.unwrap_or_else(|| random_user_id("cli"));

    tracing::info!(user_id = %user_id, level = %level, ttl, "Requesting access token");
    let token = client.access_tokens().create(&user_id, level, ttl).await?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&token)?);
        return Ok(());
    }

    header("🔑 Access Token");
    row("User", &token.user_id);
    row("Level", level);
    row("TTL", format!("{ttl}s"));
    row("Token", token.token.green());
    println!();

    Ok(())
}
