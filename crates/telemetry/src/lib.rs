//! Structured logging for the Sumsub tools
//!
//! Sets up a `tracing` subscriber with an `EnvFilter` (honouring `RUST_LOG`)
//! and either compact or JSON output. Logs go to stderr; stdout belongs to the
//! command. Every process gets a session id that is attached to the startup
//! event for log correlation.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{env, io};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

/// Environment variable selecting `compact` or `json` output
pub const LOG_FORMAT_VAR: &str = "SUMSUB_LOG_FORMAT";

/// Global session ID for correlating logs
static SESSION_ID: Lazy<String> = Lazy::new(|| Uuid::new_v4().to_string());

/// Initialize logging with default configuration
pub fn init() -> anyhow::Result<()> {
    init_with_config(TelemetryConfig::from_env())
}

/// Initialize with custom configuration
pub fn init_with_config(config: TelemetryConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let json = config.format == LogFormat::Json;
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| {
            fmt::layer()
                .json()
                .with_writer(io::stderr)
                .with_target(config.show_target)
                .with_current_span(true)
        }))
        .with((!json).then(|| {
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(config.show_target)
                .with_thread_ids(config.show_thread_ids)
                .compact()
        }));

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    tracing::info!(
        session_id = %session_id(),
        version = env!("CARGO_PKG_VERSION"),
        "Telemetry initialized"
    );

    Ok(())
}

/// Get the current session ID
pub fn session_id() -> &'static str {
    &SESSION_ID
}

/// Log line format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable single-line output
    #[default]
    Compact,
    /// One JSON object per line
    Json,
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Filter used when `RUST_LOG` is unset
    pub log_level: String,
    /// Output format
    pub format: LogFormat,
    /// Include the event target (module path)
    pub show_target: bool,
    /// Include thread ids (compact format only)
    pub show_thread_ids: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            format: LogFormat::Compact,
            show_target: false,
            show_thread_ids: false,
        }
    }
}

impl TelemetryConfig {
    /// Defaults, with the format taken from `SUMSUB_LOG_FORMAT`
    pub fn from_env() -> Self {
        Self::default().with_format(
            env::var(LOG_FORMAT_VAR)
                .map(|value| parse_format(&value))
                .unwrap_or_default(),
        )
    }

    /// Debug-level logging for the given crates, e.g. `"sumsub_webhook"`
    #[must_use]
    pub fn verbose(crates: &[&str]) -> Self {
        let directives: Vec<String> = crates.iter().map(|name| format!("{name}=debug")).collect();
        Self {
            log_level: format!("info,{}", directives.join(",")),
            show_target: true,
            ..Self::from_env()
        }
    }

    /// Builder-style method to set the output format
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }
}

fn parse_format(value: &str) -> LogFormat {
    if value.eq_ignore_ascii_case("json") {
        LogFormat::Json
    } else {
        LogFormat::Compact
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id() {
        let id = session_id();
        assert!(!id.is_empty());
        assert!(Uuid::parse_str(id).is_ok());
        assert_eq!(session_id(), id);
    }

    #[test]
    fn test_verbose_directives() {
        let config = TelemetryConfig::verbose(&["sumsub_webhook", "sumsub_crypto"]);
        assert_eq!(config.log_level, "info,sumsub_webhook=debug,sumsub_crypto=debug");
        assert!(config.show_target);
    }

    #[test]
    fn test_parse_format() {
        assert_eq!(parse_format("JSON"), LogFormat::Json);
        assert_eq!(parse_format("compact"), LogFormat::Compact);
        assert_eq!(parse_format("pretty"), LogFormat::Compact);
    }

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.format, LogFormat::Compact);
    }
}
