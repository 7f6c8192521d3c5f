//! SDK access token endpoint

use crate::client::SumsubClient;
use crate::error::ApiResult;
use reqwest::{Method, RequestBuilder};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Verification level used when none is given
pub const DEFAULT_LEVEL_NAME: &str = "basic-kyb-BRLA";

/// Token lifetime used when none is given
pub const DEFAULT_TTL_SECS: u32 = 1200;

const SEGMENTS: [&str; 2] = ["resources", "accessTokens"];

/// Access token API interface
#[derive(Clone)]
pub struct AccessTokensApi {
    client: SumsubClient,
}

impl AccessTokensApi {
    pub(crate) fn new(client: SumsubClient) -> Self {
        Self { client }
    }

    /// Create an access token for the web/mobile SDK
    pub async fn create(
        &self,
        user_id: &str,
        level_name: &str,
        ttl_secs: u32,
    ) -> ApiResult<AccessToken> {
        self.client
            .post(&SEGMENTS, &query(user_id, level_name, ttl_secs), Option::<&()>::None)
            .await
    }

    /// Build the signed request without sending it
    pub fn create_request(
        &self,
        user_id: &str,
        level_name: &str,
        ttl_secs: u32,
    ) -> ApiResult<RequestBuilder> {
        let url = self.client.url(&SEGMENTS, &query(user_id, level_name, ttl_secs))?;
        self.client.signed_request(Method::POST, url, None)
    }
}

fn query(user_id: &str, level_name: &str, ttl_secs: u32) -> [(&'static str, String); 3] {
    [
        ("userId", user_id.to_string()),
        ("ttlInSecs", ttl_secs.to_string()),
        ("levelName", level_name.to_string()),
    ]
}

/// Access token response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessToken {
    /// Token handed to the SDK
    pub token: String,
    /// External user id the token is bound to
    pub user_id: String,
}

/// Generate a throwaway external user id like `random-<prefix>-3f9a0c1b2`
#[must_use]
pub fn random_user_id(prefix: &str) -> String {
    let entropy = Uuid::new_v4().simple().to_string();
    format!("random-{prefix}-{}", &entropy[..9])
}
