//! Sumsub webhook receiver
//!
//! Listens for `POST /`, verifies `X-Payload-Digest` with the secret from
//! `SECRET_KEY_WEBHOOK`, and logs accepted events.

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use std::process::ExitCode;
use sumsub_telemetry::TelemetryConfig;
use sumsub_webhook::{PayloadLogging, WebhookConfig};

/// Receive and verify Sumsub webhook notifications
#[derive(Parser)]
#[command(name = "sumsub-webhook")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Port to listen on (overrides WEBHOOK_PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Payload logging policy: off, summary or full (overrides WEBHOOK_PAYLOAD_LOGGING)
    #[arg(long)]
    payload_logging: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let telemetry = if cli.verbose {
        TelemetryConfig::verbose(&["sumsub_webhook"])
    } else {
        TelemetryConfig::from_env()
    };
    if let Err(e) = sumsub_telemetry::init_with_config(telemetry) {
        eprintln!("{} {}", "Warning:".yellow().bold(), e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Webhook server failed");
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = WebhookConfig::from_env().context("Failed to load webhook configuration")?;
    tracing::info!(secret_present = true, "Webhook secret loaded");

    if let Some(port) = cli.port {
        config = config.with_port(port);
    }
    if let Some(policy) = cli.payload_logging {
        let policy: PayloadLogging = policy.parse()?;
        config = config.with_payload_logging(policy);
    }

    sumsub_webhook::serve(config).await?;
    Ok(())
}
