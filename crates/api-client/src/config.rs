//! Configuration for the Sumsub API client
//!
//! Credentials come from the process environment once at startup and are
//! immutable afterwards.

use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use sumsub_crypto::SecretKey;

/// Default production API URL
pub const DEFAULT_BASE_URL: &str = "https://api.sumsub.com";

/// Environment variable holding the public application token
pub const APP_TOKEN_VAR: &str = "APP_TOKEN";

/// Environment variable holding the outbound signing secret
pub const SECRET_KEY_VAR: &str = "SECRET_KEY";

/// Environment variable overriding the API base URL
pub const BASE_URL_VAR: &str = "SUMSUB_BASE_URL";

/// Environment variable overriding the request timeout
pub const TIMEOUT_VAR: &str = "SUMSUB_TIMEOUT_SECS";

/// Application token plus the secret used to sign outbound requests
#[derive(Debug, Clone)]
pub struct Credentials {
    app_token: String,
    secret_key: SecretKey,
}

impl Credentials {
    /// Create credentials from an app token and a signing secret
    pub fn new(app_token: impl Into<String>, secret_key: SecretKey) -> ApiResult<Self> {
        let app_token = app_token.into();
        if app_token.is_empty() {
            return Err(ApiError::config("app token cannot be empty"));
        }
        Ok(Self {
            app_token,
            secret_key,
        })
    }

    /// Load `APP_TOKEN` and `SECRET_KEY` from the environment
    pub fn from_env() -> ApiResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load credentials through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ApiResult<Self> {
        let app_token = required(&lookup, APP_TOKEN_VAR)?;
        let secret_key = SecretKey::try_from(required(&lookup, SECRET_KEY_VAR)?)?;
        Self::new(app_token, secret_key)
    }

    /// The public application token
    #[must_use]
    pub fn app_token(&self) -> &str {
        &self.app_token
    }

    /// The signing secret
    #[must_use]
    pub fn secret_key(&self) -> &SecretKey {
        &self.secret_key
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> ApiResult<String> {
    lookup(name)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ApiError::missing_env(name))
}

/// Non-secret client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL of the Sumsub API
    pub base_url: String,
    /// Request timeout
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Non-secret settings
    pub settings: Settings,
    /// Signing credentials
    pub credentials: Credentials,
}

impl ClientConfig {
    /// Create configuration with default settings
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self {
            settings: Settings::default(),
            credentials,
        }
    }

    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `APP_TOKEN`: Sumsub application token (required)
    /// - `SECRET_KEY`: Secret used to sign requests (required)
    /// - `SUMSUB_BASE_URL`: API base URL (optional)
    /// - `SUMSUB_TIMEOUT_SECS`: Request timeout in seconds (optional)
    pub fn from_env() -> ApiResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Create configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ApiResult<Self> {
        let credentials = Credentials::from_lookup(&lookup)?;

        let base_url = lookup(BASE_URL_VAR)
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = match lookup(TIMEOUT_VAR) {
            Some(raw) => raw
                .parse()
                .map(Duration::from_secs)
                .map_err(|_| ApiError::config(format!("{TIMEOUT_VAR} must be a whole number of seconds")))?,
            None => Settings::default().timeout,
        };

        Ok(Self {
            settings: Settings { base_url, timeout },
            credentials,
        })
    }

    /// Base URL of the Sumsub API
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.settings.base_url
    }

    /// Builder-style method to set base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.settings.base_url = url.into();
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.settings.timeout = timeout;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        let base_url = &self.settings.base_url;
        if base_url.is_empty() {
            return Err(ApiError::config("base_url cannot be empty"));
        }

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ApiError::config("base_url must start with http:// or https://"));
        }

        if self.settings.timeout.is_zero() {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        Ok(())
    }
}
