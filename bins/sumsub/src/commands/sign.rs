//! `sign` command: compute authentication headers offline

use crate::OutputFormat;
use anyhow::{Result, bail};
use serde::Serialize;
use sumsub_api_client::signer::{Clock, SystemClock};
use sumsub_api_client::{Credentials, RequestSigner};

#[derive(Serialize)]
struct SignOutput {
    method: String,
    path: String,
    headers: serde_json::Map<String, serde_json::Value>,
}

/// Print the three authentication headers for a request
pub fn run(
    method: &str,
    path: &str,
    timestamp: Option<i64>,
    body: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    if !path.starts_with('/') {
        bail!("Path must start with '/': {path}");
    }

    let credentials = Credentials::from_env()?;
    tracing::debug!(app_token_present = true, secret_key_present = true, "Loaded credentials");

    let signer = RequestSigner::new(credentials);
    let timestamp = timestamp.unwrap_or_else(|| SystemClock.unix_timestamp());
    let method = method.to_ascii_uppercase();
    let signed = signer.sign(&method, path, timestamp, body.map(str::as_bytes));

    let pairs: Vec<(String, String)> = signed
        .pairs()
        .into_iter()
        .map(|(name, value)| (header_case(name), value))
        .collect();

    if format == OutputFormat::Json {
        let headers = pairs
            .into_iter()
            .map(|(name, value)| (name, serde_json::Value::String(value)))
            .collect();
        let output = SignOutput {
            method,
            path: path.to_string(),
            headers,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for (name, value) in &pairs {
        println!("{name}: {value}");
    }

    Ok(())
}

/// `x-app-access-sig` -> `X-App-Access-Sig`
fn header_case(name: &str) -> String {
    name.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}
