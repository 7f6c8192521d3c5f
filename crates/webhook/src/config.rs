//! Configuration for the webhook receiver

use crate::error::{Result, WebhookError};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use sumsub_crypto::SecretKey;

/// Environment variable holding the webhook verification secret
pub const SECRET_VAR: &str = "SECRET_KEY_WEBHOOK";

/// Environment variable overriding the listen address
pub const HOST_VAR: &str = "WEBHOOK_HOST";

/// Environment variable overriding the listen port
pub const PORT_VAR: &str = "WEBHOOK_PORT";

/// Environment variable selecting the payload logging policy
pub const PAYLOAD_LOGGING_VAR: &str = "WEBHOOK_PAYLOAD_LOGGING";

/// Default listen port
pub const DEFAULT_PORT: u16 = 4000;

/// How much of an accepted event ends up in the logs
///
/// Webhook payloads carry applicant PII, so this is a deployment decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadLogging {
    /// Log only that an event arrived
    Off,
    /// Log event type, applicant id and review outcome
    #[default]
    Summary,
    /// Log the whole decoded payload
    Full,
}

impl FromStr for PayloadLogging {
    type Err = WebhookError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "off" | "none" => Ok(Self::Off),
            "summary" => Ok(Self::Summary),
            "full" => Ok(Self::Full),
            other => Err(WebhookError::config(format!(
                "{PAYLOAD_LOGGING_VAR} must be off, summary or full (got {other:?})"
            ))),
        }
    }
}

impl fmt::Display for PayloadLogging {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Off => "off",
            Self::Summary => "summary",
            Self::Full => "full",
        })
    }
}

/// Non-secret server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Address to bind
    pub host: IpAddr,
    /// Port to bind
    pub port: u16,
    /// Payload logging policy
    pub payload_logging: PayloadLogging,
    /// Largest request body accepted, in bytes
    pub max_body_bytes: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            payload_logging: PayloadLogging::default(),
            max_body_bytes: 1024 * 1024,
        }
    }
}

/// Webhook receiver configuration
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    /// Secret shared with Sumsub for payload digests
    pub secret: SecretKey,
    /// Server settings
    pub settings: ServerSettings,
}

impl WebhookConfig {
    /// Create configuration with default settings
    #[must_use]
    pub fn new(secret: SecretKey) -> Self {
        Self {
            secret,
            settings: ServerSettings::default(),
        }
    }

    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `SECRET_KEY_WEBHOOK`: digest secret (required)
    /// - `WEBHOOK_HOST`: listen address (optional, default `0.0.0.0`)
    /// - `WEBHOOK_PORT`: listen port (optional, default 4000)
    /// - `WEBHOOK_PAYLOAD_LOGGING`: `off`, `summary` or `full` (optional)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Create configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let secret = lookup(SECRET_VAR)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| WebhookError::missing_env(SECRET_VAR))?;
        let mut config = Self::new(SecretKey::try_from(secret)?);

        if let Some(host) = lookup(HOST_VAR) {
            config.settings.host = host
                .parse()
                .map_err(|_| WebhookError::config(format!("{HOST_VAR} is not an IP address")))?;
        }

        if let Some(port) = lookup(PORT_VAR) {
            config.settings.port = port
                .parse()
                .map_err(|_| WebhookError::config(format!("{PORT_VAR} is not a valid port")))?;
        }

        if let Some(policy) = lookup(PAYLOAD_LOGGING_VAR) {
            config.settings.payload_logging = policy.parse()?;
        }

        Ok(config)
    }

    /// Builder-style method to set the port
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.settings.port = port;
        self
    }

    /// Builder-style method to set the payload logging policy
    #[must_use]
    pub fn with_payload_logging(mut self, policy: PayloadLogging) -> Self {
        self.settings.payload_logging = policy;
        self
    }

    /// Socket address to bind
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.settings.host, self.settings.port)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.settings.max_body_bytes == 0 {
            return Err(WebhookError::config("max_body_bytes cannot be zero"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = WebhookConfig::from_lookup(lookup(&[("SECRET_KEY_WEBHOOK", "whsec")])).unwrap();
        assert_eq!(config.secret.expose(), b"whsec");
        assert_eq!(config.settings.port, 4000);
        assert_eq!(config.settings.payload_logging, PayloadLogging::Summary);
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:4000");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_secret() {
        let err = WebhookConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, WebhookError::MissingEnvVar(ref name) if name == SECRET_VAR));

        let err = WebhookConfig::from_lookup(lookup(&[("SECRET_KEY_WEBHOOK", "")])).unwrap_err();
        assert!(matches!(err, WebhookError::MissingEnvVar(_)));
    }

    #[test]
    fn test_overrides() {
        let config = WebhookConfig::from_lookup(lookup(&[
            ("SECRET_KEY_WEBHOOK", "whsec"),
            ("WEBHOOK_HOST", "127.0.0.1"),
            ("WEBHOOK_PORT", "8081"),
            ("WEBHOOK_PAYLOAD_LOGGING", "FULL"),
        ]))
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8081");
        assert_eq!(config.settings.payload_logging, PayloadLogging::Full);
    }

    #[test]
    fn test_invalid_values() {
        for (var, value) in [
            ("WEBHOOK_PORT", "70000"),
            ("WEBHOOK_HOST", "localhost"),
            ("WEBHOOK_PAYLOAD_LOGGING", "verbose"),
        ] {
            let err = WebhookConfig::from_lookup(lookup(&[("SECRET_KEY_WEBHOOK", "whsec"), (var, value)]))
                .unwrap_err();
            assert!(matches!(err, WebhookError::Config(_)), "{var}={value}");
        }
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = WebhookConfig::from_lookup(lookup(&[("SECRET_KEY_WEBHOOK", "whsec-123")])).unwrap();
        assert!(!format!("{config:?}").contains("whsec-123"));
    }

    #[test]
    fn test_payload_logging_display_round_trip() {
        for policy in [PayloadLogging::Off, PayloadLogging::Summary, PayloadLogging::Full] {
            assert_eq!(policy.to_string().parse::<PayloadLogging>().unwrap(), policy);
        }
    }
}
