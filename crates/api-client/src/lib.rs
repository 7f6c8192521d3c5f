//! Signed HTTP client for the Sumsub verification API
//!
//! Every outbound call is authenticated with three headers computed from the
//! application token and a shared secret:
//!
//! - `X-App-Token`: the application token
//! - `X-App-Access-Ts`: Unix seconds at signing time
//! - `X-App-Access-Sig`: hex HMAC-SHA256 over `ts ‖ METHOD ‖ path?query ‖ body`
//!
//! # Example
//!
//! ```rust,no_run
//! use sumsub_api_client::SumsubClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads APP_TOKEN and SECRET_KEY from the environment
//!     let client = SumsubClient::new()?;
//!
//!     let applicant = client.applicants().status("674080e0f1fdbc194478707b").await?;
//!     println!("Review: {:?}", applicant.review);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod signer;

pub use client::SumsubClient;
pub use config::{ClientConfig, Credentials, Settings};
pub use error::{ApiError, ApiResult};
pub use signer::{Clock, FixedClock, RequestSigner, SignedHeaders, SystemClock};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::SumsubClient;
    pub use crate::config::{ClientConfig, Credentials};
    pub use crate::endpoints::{AccessTokensApi, ApplicantsApi};
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::signer::{RequestSigner, SignedHeaders};
}
