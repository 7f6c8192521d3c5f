//! HTTP endpoint receiving Sumsub webhooks
//!
//! | Outcome | Status |
//! |---------|--------|
//! | digest verified, event processed | 200 |
//! | body unreadable or not a JSON object | 400 |
//! | digest missing, unknown or wrong | 401 |
//! | handler failed | 500 |
//!
//! Response bodies are fixed strings and never echo digests.

use crate::config::WebhookConfig;
use crate::error::Result;
use crate::event::{EventHandler, LoggingHandler, WebhookEvent};
use crate::verifier::WebhookVerifier;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

/// Shared state for the webhook route
#[derive(Clone)]
pub struct AppState {
    verifier: Arc<WebhookVerifier>,
    handler: Arc<dyn EventHandler>,
}

impl AppState {
    /// Create state from a verifier and a downstream handler
    pub fn new(verifier: WebhookVerifier, handler: Arc<dyn EventHandler>) -> Self {
        Self {
            verifier: Arc::new(verifier),
            handler,
        }
    }
}

/// Build the webhook router (`POST /`)
pub fn router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", post(receive))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}

async fn receive(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: std::result::Result<Bytes, BytesRejection>,
) -> (StatusCode, &'static str) {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            warn!(status = rejection.status().as_u16(), error = %rejection, "Webhook body unreadable");
            return (StatusCode::BAD_REQUEST, "Malformed payload");
        }
    };

    let payload = match state.verifier.open(&headers, &body) {
        Ok(payload) => payload,
        Err(reason) => {
            warn!(reason = %reason, "Webhook signature rejected");
            return (StatusCode::UNAUTHORIZED, "Invalid signature");
        }
    };

    let event: WebhookEvent = match payload.parse() {
        Ok(event) => event,
        Err(err) => {
            warn!(error = %err, "Webhook payload is not a JSON object");
            return (StatusCode::BAD_REQUEST, "Malformed payload");
        }
    };

    if let Err(err) = state.handler.handle(&event) {
        error!(error = %err, event_type = event.kind(), "Webhook handler failed");
        return (StatusCode::INTERNAL_SERVER_ERROR, "Processing failed");
    }

    (StatusCode::OK, "Webhook received")
}

/// Bind and serve until Ctrl-C, logging accepted events per the config's policy
pub async fn serve(config: WebhookConfig) -> Result<()> {
    let handler = Arc::new(LoggingHandler::new(config.settings.payload_logging));
    serve_with_handler(config, handler).await
}

/// Bind and serve until Ctrl-C with a custom handler
pub async fn serve_with_handler(config: WebhookConfig, handler: Arc<dyn EventHandler>) -> Result<()> {
    config.validate()?;

    let addr = config.socket_addr();
    let max_body_bytes = config.settings.max_body_bytes;
    let state = AppState::new(WebhookVerifier::new(config.secret), handler);

    let listener = TcpListener::bind(addr).await?;
    info!(
        addr = %addr,
        payload_logging = %config.settings.payload_logging,
        "Webhook server listening"
    );

    axum::serve(listener, router(state, max_body_bytes))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Webhook server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "Failed to listen for shutdown signal");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WebhookError;
    use crate::verifier::{DIGEST_ALG_HEADER, DIGEST_HEADER};
    use axum::body::Body;
    use axum::http::Request;
    use std::sync::Mutex;
    use sumsub_crypto::{hmac_sha256, SecretKey};
    use tower::ServiceExt;

    const SECRET: &[u8] = b"k1";

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<WebhookEvent>>,
        fail: bool,
    }

    impl EventHandler for Recorder {
        fn handle(&self, event: &WebhookEvent) -> Result<()> {
            if self.fail {
                return Err(WebhookError::handler("downstream unavailable"));
            }
            self.events.lock().unwrap().push(event.clone());
            Ok(())
        }
    }

    fn app(recorder: Arc<Recorder>) -> Router {
        let verifier = WebhookVerifier::new(SecretKey::new(SECRET).unwrap());
        router(AppState::new(verifier, recorder), 1024)
    }

    fn request(body: &[u8], digest: Option<String>, algorithm: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/")
            .header(DIGEST_ALG_HEADER, algorithm);
        if let Some(digest) = digest {
            builder = builder.header(DIGEST_HEADER, digest);
        }
        builder.body(Body::from(body.to_vec())).unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_accepted_event_reaches_handler() {
        let recorder = Arc::new(Recorder::default());
        let body: &[u8] = br#"{"type":"applicantReviewed","applicantId":"abc"}"#;
        let response = app(recorder.clone())
            .oneshot(request(body, Some(hmac_sha256(SECRET, body)), "HMAC_SHA256_HEX"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "Webhook received");
        let events = recorder.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].applicant_id(), Some("abc"));
    }

    #[tokio::test]
    async fn test_bad_digest_is_unauthorized_and_not_processed() {
        let recorder = Arc::new(Recorder::default());
        let body: &[u8] = br#"{"type":"applicantReviewed"}"#;
        let digest = hmac_sha256(b"other-secret", body);
        let response = app(recorder.clone())
            .oneshot(request(body, Some(digest.clone()), "HMAC_SHA256_HEX"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let text = body_text(response).await;
        assert!(!text.contains(&digest));
        assert!(!text.contains(&hmac_sha256(SECRET, body)));
        assert!(recorder.events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_digest_is_unauthorized() {
        let response = app(Arc::default())
            .oneshot(request(b"{}", None, "HMAC_SHA256_HEX"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_algorithm_is_unauthorized() {
        let body: &[u8] = b"{}";
        let response = app(Arc::default())
            .oneshot(request(body, Some(hmac_sha256(SECRET, body)), "HMAC_MD5_HEX"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_signed_garbage_is_bad_request() {
        let recorder = Arc::new(Recorder::default());
        let body: &[u8] = b"not json";
        let response = app(recorder.clone())
            .oneshot(request(body, Some(hmac_sha256(SECRET, body)), "HMAC_SHA256_HEX"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(recorder.events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_handler_failure_is_server_error() {
        let recorder = Arc::new(Recorder {
            fail: true,
            ..Recorder::default()
        });
        let body: &[u8] = b"{}";
        let response = app(recorder)
            .oneshot(request(body, Some(hmac_sha256(SECRET, body)), "HMAC_SHA256_HEX"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_signed_event_with_unexpected_field_types_is_accepted() {
        let recorder = Arc::new(Recorder::default());
        let body: &[u8] = br#"{"type":"applicantReviewed","sandboxMode":"true","reviewResult":[]}"#;
        let response = app(recorder.clone())
            .oneshot(request(body, Some(hmac_sha256(SECRET, body)), "HMAC_SHA256_HEX"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let events = recorder.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind(), "applicantReviewed");
        assert_eq!(events[0].sandbox_mode(), None);
    }

    #[tokio::test]
    async fn test_oversized_body_is_bad_request_before_verification() {
        let recorder = Arc::new(Recorder::default());
        let body = vec![b'x'; 2048];
        let response = app(recorder.clone())
            .oneshot(request(&body, Some(hmac_sha256(SECRET, &body)), "HMAC_SHA256_HEX"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "Malformed payload");
        assert!(recorder.events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_not_allowed() {
        let response = app(Arc::default())
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
