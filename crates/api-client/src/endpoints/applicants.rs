//! Applicant endpoints

use crate::client::SumsubClient;
use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};

/// Applicant API interface
#[derive(Clone)]
pub struct ApplicantsApi {
    client: SumsubClient,
}

impl ApplicantsApi {
    pub(crate) fn new(client: SumsubClient) -> Self {
        Self { client }
    }

    /// Fetch one applicant, including its review status
    pub async fn status(&self, applicant_id: &str) -> ApiResult<Applicant> {
        if applicant_id.is_empty() {
            return Err(ApiError::config("applicant id cannot be empty"));
        }
        self.client
            .get(&["resources", "applicants", applicant_id, "one"])
            .await
    }

    /// List verification levels configured for the application
    pub async fn levels(&self) -> ApiResult<Levels> {
        self.client.get(&["resources", "applicants", "-", "levels"]).await
    }
}

/// Applicant record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Applicant {
    /// Sumsub applicant id
    pub id: String,
    /// Creation time as reported by Sumsub
    pub created_at: Option<String>,
    /// Caller-side user id
    pub external_user_id: Option<String>,
    /// Verification level
    pub level_name: Option<String>,
    /// Current review state
    pub review: Option<Review>,
    /// Fields not modelled here
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Review state of an applicant
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// e.g. `init`, `pending`, `completed`
    pub review_status: Option<String>,
    /// Final answer once completed
    pub review_result: Option<ReviewResult>,
}

/// Outcome of a completed review
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResult {
    /// `GREEN` or `RED`
    pub review_answer: Option<String>,
    /// Reject labels when `RED`
    #[serde(default)]
    pub reject_labels: Vec<String>,
}

/// Level listing
///
/// Sumsub wraps list responses as `{"list": {"items": [..], "totalItems": N}}`;
/// the unwrapped form is accepted too. Anything without `items` is an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "LevelsResponse")]
pub struct Levels {
    /// Level definitions, kept as raw JSON
    pub items: Vec<serde_json::Value>,
    /// Total count reported by the API
    pub total_items: Option<u64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LevelsResponse {
    Wrapped { list: LevelPage },
    Bare(LevelPage),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LevelPage {
    items: Vec<serde_json::Value>,
    total_items: Option<u64>,
}

impl From<LevelsResponse> for Levels {
    fn from(response: LevelsResponse) -> Self {
        let (LevelsResponse::Wrapped { list: page } | LevelsResponse::Bare(page)) = response;
        Self {
            items: page.items,
            total_items: page.total_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_applicant_deserialize() {
        let json = r#"{
            "id": "674080e0f1fdbc194478707b",
            "createdAt": "2024-11-22 12:00:00",
            "externalUserId": "random-GoToken-abc",
            "levelName": "basic-kyb-BRLA",
            "inspectionId": "674080e0f1fdbc194478707c",
            "review": {
                "reviewStatus": "completed",
                "reviewResult": { "reviewAnswer": "RED", "rejectLabels": ["FORGERY"] }
            }
        }"#;

        let applicant: Applicant = serde_json::from_str(json).unwrap();
        assert_eq!(applicant.id, "674080e0f1fdbc194478707b");
        let review = applicant.review.unwrap();
        assert_eq!(review.review_status.as_deref(), Some("completed"));
        let result = review.review_result.unwrap();
        assert_eq!(result.review_answer.as_deref(), Some("RED"));
        assert_eq!(result.reject_labels, vec!["FORGERY"]);
        assert!(applicant.extra.contains_key("inspectionId"));
    }

    #[test]
    fn test_applicant_minimal() {
        let applicant: Applicant = serde_json::from_str(r#"{"id":"abc"}"#).unwrap();
        assert!(applicant.review.is_none());
        assert!(applicant.extra.is_empty());
    }

    #[test]
    fn test_levels_deserialize() {
        let json = r#"{"items":[{"name":"basic-kyb-BRLA"},{"name":"basic-kyc"}],"totalItems":2}"#;
        let levels: Levels = serde_json::from_str(json).unwrap();
        assert_eq!(levels.items.len(), 2);
        assert_eq!(levels.total_items, Some(2));

        let empty: Levels = serde_json::from_str(r#"{"items":[]}"#).unwrap();
        assert!(empty.items.is_empty());
    }

    #[test]
    fn test_levels_deserialize_list_wrapper() {
        let json = r#"{"list":{"items":[{"name":"basic-kyb-BRLA"}],"totalItems":1}}"#;
        let levels: Levels = serde_json::from_str(json).unwrap();
        assert_eq!(levels.items.len(), 1);
        assert_eq!(levels.items[0]["name"], "basic-kyb-BRLA");
        assert_eq!(levels.total_items, Some(1));
    }

    #[test]
    fn test_levels_unrecognised_shape_is_error() {
        assert!(serde_json::from_str::<Levels>("{}").is_err());
        assert!(serde_json::from_str::<Levels>(r#"{"list":{"total":3}}"#).is_err());
        assert!(serde_json::from_str::<Levels>(r#"{"levels":[{"name":"x"}]}"#).is_err());
    }
}
