//! Verification and intake of Sumsub webhook notifications
//!
//! Inbound payloads are authenticated with a shared-secret HMAC before any
//! decoding happens:
//!
//! 1. read `X-Payload-Digest` and `X-Payload-Digest-Alg`
//! 2. resolve the algorithm in an [`AlgorithmRegistry`](sumsub_crypto::AlgorithmRegistry)
//! 3. recompute the digest over the raw body
//! 4. compare in constant time; only then parse JSON
//!
//! # Example
//!
//! ```rust
//! use axum::http::HeaderMap;
//! use sumsub_crypto::{hmac_sha256, SecretKey};
//! use sumsub_webhook::{Verdict, WebhookVerifier};
//!
//! let verifier = WebhookVerifier::new(SecretKey::try_from("k1")?);
//! let body = br#"{"a":1}"#;
//!
//! let mut headers = HeaderMap::new();
//! headers.insert("x-payload-digest", hmac_sha256(b"k1", body).parse()?);
//! headers.insert("x-payload-digest-alg", "HMAC_SHA256_HEX".parse()?);
//!
//! assert_eq!(verifier.verify(&headers, body), Verdict::Accepted);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod event;
pub mod server;
pub mod verifier;

pub use config::{PayloadLogging, ServerSettings, WebhookConfig};
pub use error::{Result, WebhookError};
pub use event::{EventHandler, LoggingHandler, WebhookEvent};
pub use server::{router, serve, serve_with_handler, AppState};
pub use verifier::{verify_with_secret, RejectReason, Verdict, VerifiedPayload, WebhookVerifier};
