//! HMAC digest engine for Sumsub request signing and webhook verification.
//!
//! This crate provides:
//! - Hex-encoded HMAC-SHA1/SHA256/SHA512 digests
//! - An [`AlgorithmRegistry`] mapping header identifiers to algorithms
//! - Constant-time digest comparison
//! - A redacting [`SecretKey`] wrapper for shared secrets
//!
//! # Example
//!
//! ```rust
//! use sumsub_crypto::{compute_digest, AlgorithmRegistry};
//!
//! let registry = AlgorithmRegistry::standard();
//! let digest = compute_digest(&registry, "HMAC_SHA256_HEX", b"k1", br#"{"a":1}"#)?;
//! assert_eq!(digest.len(), 64);
//! # Ok::<(), sumsub_crypto::CryptoError>(())
//! ```

#![warn(missing_docs)]

mod algorithm;
mod error;
mod hmac_impl;
mod secret;
mod timing;

pub use algorithm::{AlgorithmRegistry, DigestAlgorithm};
pub use error::{CryptoError, Result};
pub use hmac_impl::{compute_digest, hmac_sha1, hmac_sha256, hmac_sha512, verify_signature};
pub use secret::SecretKey;
pub use timing::{constant_time_compare, digests_match};
