//! Shared-secret key material.

use std::fmt;

use crate::{CryptoError, Result};

/// A non-empty HMAC secret.
///
/// `Debug` output is redacted so the key can sit inside config structs that
/// get logged.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(Vec<u8>);

impl SecretKey {
    /// Wrap raw key bytes.
    ///
    /// # Errors
    ///
    /// [`CryptoError::InvalidKey`] when `bytes` is empty.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(CryptoError::InvalidKey("secret must not be empty".into()));
        }
        Ok(Self(bytes))
    }

    /// Raw key bytes, for feeding into an HMAC.
    pub fn expose(&self) -> &[u8] {
        &self.0
    }

    /// Key length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the key has no bytes; never true for a constructed key.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey(<redacted {} bytes>)", self.0.len())
    }
}

impl TryFrom<String> for SecretKey {
    type Error = CryptoError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value.into_bytes())
    }
}

impl TryFrom<&str> for SecretKey {
    type Error = CryptoError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value.as_bytes())
    }
}
