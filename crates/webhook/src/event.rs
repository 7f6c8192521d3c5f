//! Webhook event model and handlers

use crate::config::PayloadLogging;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

/// A decoded webhook notification
///
/// Any JSON object is accepted. The accessors read the fields common to all
/// Sumsub event types and treat a value of the wrong JSON type as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WebhookEvent(Map<String, Value>);

impl WebhookEvent {
    /// Event type or `"unknown"`
    #[must_use]
    pub fn kind(&self) -> &str {
        self.str_field("type").unwrap_or("unknown")
    }

    /// Sumsub applicant id
    #[must_use]
    pub fn applicant_id(&self) -> Option<&str> {
        self.str_field("applicantId")
    }

    /// Caller-side user id
    #[must_use]
    pub fn external_user_id(&self) -> Option<&str> {
        self.str_field("externalUserId")
    }

    /// Review state after the event
    #[must_use]
    pub fn review_status(&self) -> Option<&str> {
        self.str_field("reviewStatus")
    }

    /// `GREEN` or `RED`, present on `applicantReviewed`
    #[must_use]
    pub fn review_answer(&self) -> Option<&str> {
        self.review_result_field("reviewAnswer")
    }

    /// `FINAL` or `RETRY` for rejected reviews
    #[must_use]
    pub fn review_reject_type(&self) -> Option<&str> {
        self.review_result_field("reviewRejectType")
    }

    /// Whether the event came from the sandbox
    #[must_use]
    pub fn sandbox_mode(&self) -> Option<bool> {
        self.0.get("sandboxMode").and_then(Value::as_bool)
    }

    /// Raw value of any field
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// All fields as received
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    fn review_result_field(&self, key: &str) -> Option<&str> {
        self.0
            .get("reviewResult")
            .and_then(|result| result.get(key))
            .and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for WebhookEvent {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Downstream processing for accepted events
pub trait EventHandler: Send + Sync {
    /// Process one event. Only called after the payload digest was verified.
    fn handle(&self, event: &WebhookEvent) -> Result<()>;
}

/// Handler that records events in the log according to a [`PayloadLogging`] policy
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingHandler {
    policy: PayloadLogging,
}

impl LoggingHandler {
    /// Create a handler with the given policy
    #[must_use]
    pub fn new(policy: PayloadLogging) -> Self {
        Self { policy }
    }
}

impl EventHandler for LoggingHandler {
    fn handle(&self, event: &WebhookEvent) -> Result<()> {
        match self.policy {
            PayloadLogging::Off => info!("Webhook received"),
            PayloadLogging::Summary => info!(
                event_type = event.kind(),
                applicant_id = event.applicant_id().unwrap_or("-"),
                review_status = event.review_status().unwrap_or("-"),
                review_answer = event.review_answer().unwrap_or("-"),
                "Webhook received"
            ),
            PayloadLogging::Full => {
                let payload = serde_json::to_string(event).unwrap_or_default();
                info!(event_type = event.kind(), payload = %payload, "Webhook received");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REVIEWED: &str = r#"{
        "applicantId": "5cb56e8e0a975a35f333cb83",
        "inspectionId": "5cb56e8e0a975a35f333cb84",
        "correlationId": "req-a260b669-4f14-4bb5-a4c5-ac0218acb9a4",
        "externalUserId": "externalUserId",
        "levelName": "basic-kyc-level",
        "type": "applicantReviewed",
        "reviewResult": { "reviewAnswer": "GREEN" },
        "reviewStatus": "completed",
        "createdAtMs": "2020-02-21 13:23:19.321",
        "sandboxMode": true
    }"#;

    #[test]
    fn test_event_deserialize() {
        let event: WebhookEvent = serde_json::from_str(REVIEWED).unwrap();
        assert_eq!(event.kind(), "applicantReviewed");
        assert_eq!(event.applicant_id(), Some("5cb56e8e0a975a35f333cb83"));
        assert_eq!(event.external_user_id(), Some("externalUserId"));
        assert_eq!(event.review_status(), Some("completed"));
        assert_eq!(event.review_answer(), Some("GREEN"));
        assert_eq!(event.review_reject_type(), None);
        assert_eq!(event.sandbox_mode(), Some(true));
        assert_eq!(event.get("levelName").unwrap(), "basic-kyc-level");
        assert_eq!(event.fields().len(), 10);
    }

    #[test]
    fn test_wrongly_typed_fields_read_as_absent() {
        let json = r#"{
            "type": 7,
            "applicantId": ["abc"],
            "reviewStatus": null,
            "reviewResult": "GREEN",
            "sandboxMode": "true"
        }"#;
        let event: WebhookEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.kind(), "unknown");
        assert_eq!(event.applicant_id(), None);
        assert_eq!(event.review_status(), None);
        assert_eq!(event.review_answer(), None);
        assert_eq!(event.sandbox_mode(), None);
        assert_eq!(event.get("sandboxMode").unwrap(), "true");
    }

    #[test]
    fn test_full_logging_keeps_unmodelled_fields() {
        let event: WebhookEvent = serde_json::from_str(REVIEWED).unwrap();
        let logged = serde_json::to_string(&event).unwrap();
        assert!(logged.contains("\"correlationId\""));
        assert!(logged.contains("\"type\":\"applicantReviewed\""));
    }

    #[test]
    fn test_event_without_type() {
        let event: WebhookEvent = serde_json::from_str(r#"{"foo":"bar"}"#).unwrap();
        assert_eq!(event.kind(), "unknown");
        assert_eq!(event.review_answer(), None);
    }

    #[test]
    fn test_non_object_payload_rejected() {
        assert!(serde_json::from_str::<WebhookEvent>("[1,2,3]").is_err());
        assert!(serde_json::from_str::<WebhookEvent>("not json").is_err());
    }

    #[test]
    fn test_logging_handler_accepts_all_policies() {
        let event: WebhookEvent = serde_json::from_str(REVIEWED).unwrap();
        for policy in [PayloadLogging::Off, PayloadLogging::Summary, PayloadLogging::Full] {
            assert!(LoggingHandler::new(policy).handle(&event).is_ok());
        }
    }
}
