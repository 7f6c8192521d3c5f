//! Error types for the webhook receiver

use sumsub_crypto::CryptoError;
use thiserror::Error;

/// Result type alias for webhook operations
pub type Result<T> = std::result::Result<T, WebhookError>;

/// Webhook receiver errors
///
/// Signature rejections are not errors; see [`crate::Verdict`].
#[derive(Error, Debug)]
pub enum WebhookError {
    /// Missing environment variable
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Secret rejected by the crypto layer
    #[error("Invalid credential: {0}")]
    Credential(#[from] CryptoError),

    /// Socket error while serving
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An event handler failed after the payload was accepted
    #[error("Event handler failed: {0}")]
    Handler(String),
}

impl WebhookError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a missing env var error
    pub fn missing_env(var: impl Into<String>) -> Self {
        Self::MissingEnvVar(var.into())
    }

    /// Create a handler error
    pub fn handler(msg: impl Into<String>) -> Self {
        Self::Handler(msg.into())
    }
}
