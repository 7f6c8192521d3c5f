//! Webhook payload verification
//!
//! Sumsub signs each webhook body with the shared secret and sends the hex
//! digest in `X-Payload-Digest` together with the algorithm identifier in
//! `X-Payload-Digest-Alg`. The digest covers the raw body bytes, so the body
//! must not be decoded or re-serialized before verification.

use axum::http::HeaderMap;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use sumsub_crypto::{digests_match, AlgorithmRegistry, DigestAlgorithm, SecretKey};
use tracing::debug;

/// Header carrying the payload digest
pub const DIGEST_HEADER: &str = "x-payload-digest";

/// Header carrying the digest algorithm identifier
pub const DIGEST_ALG_HEADER: &str = "x-payload-digest-alg";

/// Why a payload was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Digest or algorithm header absent, empty or not text
    MissingHeader,
    /// Algorithm identifier not in the registry
    UnsupportedAlgorithm,
    /// Recomputed digest differs from the received one
    DigestMismatch,
}

impl RejectReason {
    /// Short description, safe to log
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingHeader => "missing header",
            Self::UnsupportedAlgorithm => "unsupported algorithm",
            Self::DigestMismatch => "digest mismatch",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of verifying one payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Digest matched
    Accepted,
    /// Digest missing, unknown or wrong
    Rejected(RejectReason),
}

impl Verdict {
    /// Whether the payload may be processed
    #[must_use]
    pub fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted)
    }
}

impl From<Result<DigestAlgorithm, RejectReason>> for Verdict {
    fn from(result: Result<DigestAlgorithm, RejectReason>) -> Self {
        match result {
            Ok(_) => Self::Accepted,
            Err(reason) => Self::Rejected(reason),
        }
    }
}

fn header<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
}

fn check(
    registry: &AlgorithmRegistry,
    headers: &HeaderMap,
    raw_body: &[u8],
    secret: &SecretKey,
) -> Result<DigestAlgorithm, RejectReason> {
    let (Some(received), Some(algorithm_id)) =
        (header(headers, DIGEST_HEADER), header(headers, DIGEST_ALG_HEADER))
    else {
        return Err(RejectReason::MissingHeader);
    };

    let algorithm = registry
        .resolve(algorithm_id)
        .ok_or(RejectReason::UnsupportedAlgorithm)?;

    let expected = algorithm.digest_hex(secret.expose(), raw_body);
    if digests_match(&expected, received) {
        Ok(algorithm)
    } else {
        Err(RejectReason::DigestMismatch)
    }
}

/// Verify `raw_body` against the digest headers using `secret`
pub fn verify_with_secret(
    registry: &AlgorithmRegistry,
    headers: &HeaderMap,
    raw_body: &[u8],
    secret: &SecretKey,
) -> Verdict {
    check(registry, headers, raw_body, secret).into()
}

/// A body whose digest has been checked
///
/// Only [`WebhookVerifier::open`] creates one, so code that takes a
/// `VerifiedPayload` cannot run on unauthenticated input.
#[derive(Debug, Clone, Copy)]
pub struct VerifiedPayload<'a> {
    body: &'a [u8],
    algorithm: DigestAlgorithm,
}

impl<'a> VerifiedPayload<'a> {
    /// Algorithm the sender used
    #[must_use]
    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    /// The raw body bytes
    #[must_use]
    pub fn bytes(&self) -> &'a [u8] {
        self.body
    }

    /// Decode the body as JSON
    pub fn parse<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(self.body)
    }
}

/// Verifies webhook payloads with one secret and an algorithm registry
#[derive(Debug, Clone)]
pub struct WebhookVerifier {
    secret: SecretKey,
    registry: Arc<AlgorithmRegistry>,
}

impl WebhookVerifier {
    /// Create a verifier accepting the standard Sumsub algorithms
    #[must_use]
    pub fn new(secret: SecretKey) -> Self {
        Self {
            secret,
            registry: Arc::new(AlgorithmRegistry::standard()),
        }
    }

    /// Builder-style method to replace the algorithm registry
    #[must_use]
    pub fn with_registry(mut self, registry: AlgorithmRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    /// The registry in use
    #[must_use]
    pub fn registry(&self) -> &AlgorithmRegistry {
        &self.registry
    }

    /// Verify a payload
    pub fn verify(&self, headers: &HeaderMap, raw_body: &[u8]) -> Verdict {
        self.open(headers, raw_body).map(|payload| payload.algorithm).into()
    }

    /// Verify a payload and hand it back for decoding
    pub fn open<'a>(
        &self,
        headers: &HeaderMap,
        raw_body: &'a [u8],
    ) -> Result<VerifiedPayload<'a>, RejectReason> {
        let result = check(&self.registry, headers, raw_body, &self.secret);
        match &result {
            Ok(algorithm) => debug!(algorithm = %algorithm, bytes = raw_body.len(), "Webhook digest verified"),
            Err(reason) => debug!(reason = %reason, bytes = raw_body.len(), "Webhook digest rejected"),
        }
        result.map(|algorithm| VerifiedPayload {
            body: raw_body,
            algorithm,
        })
    }
}
