//! Main API client implementation

use crate::config::ClientConfig;
use crate::endpoints::{AccessTokensApi, ApplicantsApi};
use crate::error::{ApiError, ApiResult};
use crate::signer::{path_and_query, Clock, RequestSigner, SystemClock};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

const CLIENT_USER_AGENT: &str = concat!("sumsub-api-client/", env!("CARGO_PKG_VERSION"));

/// Sumsub API client that signs every request
///
/// Cheap to clone; all state is immutable and shared.
#[derive(Clone)]
pub struct SumsubClient {
    inner: Client,
    config: Arc<ClientConfig>,
    signer: Arc<RequestSigner>,
    clock: Arc<dyn Clock>,
}

impl SumsubClient {
    /// Create a new client with configuration from environment
    pub fn new() -> ApiResult<Self> {
        let config = ClientConfig::from_env()?;
        Self::with_config(config)
    }

    /// Create a new client with specific configuration
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        default_headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

        let inner = Client::builder()
            .timeout(config.settings.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(ApiError::Request)?;

        let signer = Arc::new(RequestSigner::new(config.credentials.clone()));

        Ok(Self {
            inner,
            config: Arc::new(config),
            signer,
            clock: Arc::new(SystemClock),
        })
    }

    /// Replace the timestamp source used for signing
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    /// Get the request signer
    #[must_use]
    pub fn signer(&self) -> &RequestSigner {
        &self.signer
    }

    // -------------------------------------------------------------------------
    // Endpoint API accessors
    // -------------------------------------------------------------------------

    /// Access token endpoints
    #[must_use]
    pub fn access_tokens(&self) -> AccessTokensApi {
        AccessTokensApi::new(self.clone())
    }

    /// Applicant endpoints
    #[must_use]
    pub fn applicants(&self) -> ApplicantsApi {
        ApplicantsApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Low-level signed HTTP
    // -------------------------------------------------------------------------

    /// Build an API URL from path segments and query pairs
    ///
    /// Segments and query values are percent-encoded here, so the URL's
    /// path and query are exactly what goes on the wire and gets signed.
    pub fn url(&self, segments: &[&str], query: &[(&str, String)]) -> ApiResult<Url> {
        let mut url = Url::parse(self.base_url()).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;

        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(format!("{} cannot be a base", self.base_url())))?
            .pop_if_empty()
            .extend(segments);

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in query {
                pairs.append_pair(name, value);
            }
        }

        Ok(url)
    }

    /// Build a signed request without sending it
    pub fn signed_request(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> ApiResult<RequestBuilder> {
        let timestamp = self.clock.unix_timestamp();
        let target = path_and_query(&url);
        let signed = self
            .signer
            .sign(method.as_str(), &target, timestamp, body.as_deref());

        let mut headers = HeaderMap::new();
        signed.apply(&mut headers)?;

        let request_id = Uuid::new_v4().to_string();
        debug!(
            request_id = %request_id,
            method = %method,
            target = %target,
            timestamp,
            "Signed request"
        );

        let mut request = self
            .inner
            .request(method, url)
            .headers(headers)
            .header(X_REQUEST_ID, request_id);

        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(body);
        }

        Ok(request)
    }

    /// Perform a signed GET request
    pub async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> ApiResult<T> {
        let url = self.url(segments, &[])?;
        self.send(Method::GET, url, None).await
    }

    /// Perform a signed POST request with an optional JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> ApiResult<T> {
        let url = self.url(segments, query)?;
        let body = body.map(serde_json::to_vec).transpose()?;
        self.send(Method::POST, url, body).await
    }

    /// Sign, send and decode one request
    #[instrument(skip(self, body), fields(path = %url.path()))]
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> ApiResult<T> {
        let request = self.signed_request(method, url, body)?;

        let start = Instant::now();
        let response = request.send().await?;
        debug!(
            status = response.status().as_u16(),
            elapsed_ms = start.elapsed().as_millis(),
            "Response received"
        );

        self.handle_response(response).await
    }

    /// Handle HTTP response and deserialize
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> ApiResult<T> {
        let status = response.status();

        if status.is_success() {
            response.json().await.map_err(ApiError::Request)
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(status = status.as_u16(), "Sumsub API returned an error");
            Err(ApiError::api_response(status.as_u16(), message))
        }
    }
}
