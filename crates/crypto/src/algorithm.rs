//! Digest algorithms and the registry that maps header identifiers to them.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::CryptoError;

/// Keyed-hash primitives understood by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DigestAlgorithm {
    /// HMAC over SHA-1 (legacy webhook senders)
    HmacSha1,
    /// HMAC over SHA-256
    HmacSha256,
    /// HMAC over SHA-512
    HmacSha512,
}

impl DigestAlgorithm {
    /// All algorithms, in registry order.
    pub const ALL: [Self; 3] = [Self::HmacSha1, Self::HmacSha256, Self::HmacSha512];

    /// Identifier carried in the `X-Payload-Digest-Alg` header.
    pub const fn id(self) -> &'static str {
        match self {
            Self::HmacSha1 => "HMAC_SHA1_HEX",
            Self::HmacSha256 => "HMAC_SHA256_HEX",
            Self::HmacSha512 => "HMAC_SHA512_HEX",
        }
    }

    /// Length of the hex-encoded digest.
    pub const fn hex_len(self) -> usize {
        match self {
            Self::HmacSha1 => 40,
            Self::HmacSha256 => 64,
            Self::HmacSha512 => 128,
        }
    }

    /// Compute the lower-case hex HMAC of `message` keyed by `key`.
    pub fn digest_hex(self, key: &[u8], message: &[u8]) -> String {
        match self {
            Self::HmacSha1 => crate::hmac_sha1(key, message),
            Self::HmacSha256 => crate::hmac_sha256(key, message),
            Self::HmacSha512 => crate::hmac_sha512(key, message),
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|alg| alg.id() == s)
            .ok_or_else(|| CryptoError::unsupported(s))
    }
}

/// Closed mapping from algorithm identifiers to digest algorithms.
///
/// Lookups are exact and case-sensitive. The registry is a plain value so
/// callers can hand a reduced or extended set to a verifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmRegistry {
    entries: BTreeMap<String, DigestAlgorithm>,
}

impl AlgorithmRegistry {
    /// A registry that accepts nothing.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// The identifiers Sumsub sends: SHA-1, SHA-256 and SHA-512 in hex.
    pub fn standard() -> Self {
        DigestAlgorithm::ALL
            .into_iter()
            .fold(Self::empty(), |registry, alg| registry.with(alg.id(), alg))
    }

    /// Builder-style method to register an identifier.
    #[must_use]
    pub fn with(mut self, id: impl Into<String>, algorithm: DigestAlgorithm) -> Self {
        self.entries.insert(id.into(), algorithm);
        self
    }

    /// Builder-style method to drop an identifier.
    #[must_use]
    pub fn without(mut self, id: &str) -> Self {
        self.entries.remove(id);
        self
    }

    /// Look up an identifier.
    pub fn resolve(&self, id: &str) -> Option<DigestAlgorithm> {
        self.entries.get(id).copied()
    }

    /// Look up an identifier, failing with [`CryptoError::UnsupportedAlgorithm`].
    pub fn require(&self, id: &str) -> crate::Result<DigestAlgorithm> {
        self.resolve(id).ok_or_else(|| CryptoError::unsupported(id))
    }

    /// Registered identifiers in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of registered identifiers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry accepts nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
