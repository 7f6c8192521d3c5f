//! Error types for the crypto crate.

use thiserror::Error;

/// Result type alias for crypto operations.
pub type Result<T> = std::result::Result<T, CryptoError>;

/// Errors that can occur during crypto operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// The algorithm identifier is not in the registry
    #[error("Unsupported digest algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Signature verification failed
    #[error("Signature mismatch")]
    SignatureMismatch,

    /// Invalid key
    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

impl CryptoError {
    /// Create an unsupported algorithm error
    pub fn unsupported(id: impl Into<String>) -> Self {
        Self::UnsupportedAlgorithm(id.into())
    }
}
