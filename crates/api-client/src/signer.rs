//! Request signing for the Sumsub API
//!
//! Every call carries three headers: the app token, the access timestamp and
//! a hex HMAC-SHA256 over `timestamp ‖ METHOD ‖ path?query ‖ body`. The
//! server rebuilds the same bytes, so field order and the absence of
//! separators matter.

use crate::config::Credentials;
use crate::error::{ApiError, ApiResult};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Url;
use std::fmt;
use sumsub_crypto::{DigestAlgorithm, SecretKey};

/// Header carrying the application token
pub const APP_TOKEN_HEADER: &str = "x-app-token";

/// Header carrying the request signature
pub const ACCESS_SIG_HEADER: &str = "x-app-access-sig";

/// Header carrying the signing timestamp
pub const ACCESS_TS_HEADER: &str = "x-app-access-ts";

/// Algorithm used for outbound signatures
pub const SIGNING_ALGORITHM: DigestAlgorithm = DigestAlgorithm::HmacSha256;

/// Source of Unix timestamps for signing
pub trait Clock: Send + Sync + fmt::Debug {
    /// Current Unix time in seconds
    fn unix_timestamp(&self) -> i64;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_timestamp(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Clock frozen at a given timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn unix_timestamp(&self) -> i64 {
        self.0
    }
}

/// Header values that authenticate one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    /// Value for `X-App-Token`
    pub app_token: String,
    /// Value for `X-App-Access-Sig`
    pub signature: String,
    /// Value for `X-App-Access-Ts`
    pub timestamp: i64,
}

impl SignedHeaders {
    /// Header name/value pairs in wire order
    #[must_use]
    pub fn pairs(&self) -> [(&'static str, String); 3] {
        [
            (APP_TOKEN_HEADER, self.app_token.clone()),
            (ACCESS_SIG_HEADER, self.signature.clone()),
            (ACCESS_TS_HEADER, self.timestamp.to_string()),
        ]
    }

    /// Insert the three headers, replacing any previous values
    pub fn apply(&self, headers: &mut HeaderMap) -> ApiResult<()> {
        for (name, value) in self.pairs() {
            let value = HeaderValue::from_str(&value).map_err(|_| ApiError::InvalidHeader(name))?;
            headers.insert(HeaderName::from_static(name), value);
        }
        Ok(())
    }
}

/// Signs outbound requests with the application credentials
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credentials: Credentials,
}

impl RequestSigner {
    /// Create a signer for the given credentials
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// Bytes the signature is computed over
    ///
    /// `path_with_query` is used verbatim; query values must already be
    /// percent-encoded exactly as they will appear on the wire.
    #[must_use]
    pub fn canonical_message(
        method: &str,
        path_with_query: &str,
        timestamp: i64,
        body: Option<&[u8]>,
    ) -> Vec<u8> {
        let mut message = format!(
            "{timestamp}{}{path_with_query}",
            method.to_ascii_uppercase()
        )
        .into_bytes();
        if let Some(body) = body.filter(|body| !body.is_empty()) {
            message.extend_from_slice(body);
        }
        message
    }

    /// Produce the headers for one request
    #[must_use]
    pub fn sign(
        &self,
        method: &str,
        path_with_query: &str,
        timestamp: i64,
        body: Option<&[u8]>,
    ) -> SignedHeaders {
        let message = Self::canonical_message(method, path_with_query, timestamp, body);
        SignedHeaders {
            app_token: self.credentials.app_token().to_string(),
            signature: SIGNING_ALGORITHM.digest_hex(self.secret().expose(), &message),
            timestamp,
        }
    }

    fn secret(&self) -> &SecretKey {
        self.credentials.secret_key()
    }
}

/// The part of `url` that is signed: path plus `?query` when present
#[must_use]
pub fn path_and_query(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{query}", url.path()),
        None => url.path().to_string(),
    }
}
