//! Endpoint-specific API implementations
//!
//! Each module provides a typed interface for a set of Sumsub endpoints.
//!
//! | Module | Endpoint | Description |
//! |--------|----------|-------------|
//! | `access_tokens` | `POST /resources/accessTokens` | SDK access tokens |
//! | `applicants` | `GET /resources/applicants/...` | Applicant status and levels |

pub mod access_tokens;
pub mod applicants;

pub use access_tokens::AccessTokensApi;
pub use applicants::ApplicantsApi;
