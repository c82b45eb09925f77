//! Storefront API client
//!
//! Thin wrappers around the storefront's REST endpoints. Every call attaches
//! the stored bearer token when there is one, clears the token when the API
//! answers 401, and logs a warning before handing any failure back to the
//! caller. Nothing is retried or cached.

use serde::{Deserialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::{debug, warn};

pub mod donations;
pub mod foods;
pub mod products;
pub mod token;
pub mod transport;

pub use token::{FileTokenStore, MemoryTokenStore, TokenStore, TokenStoreError};
pub use transport::{
    ApiRequest, ApiResponse, Method, MockTransport, ReqwestTransport, Transport, TransportError,
};

/// API client errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The API rejected the bearer token; the stored token has been cleared.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The API answered with a non-success status.
    #[error("request failed with status {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Error message from the response body
        message: String,
    },

    /// The response body was not the expected JSON.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A path id was empty or contained reserved characters.
    #[error("invalid id: {0:?}")]
    InvalidId(String),

    /// Clearing the stored token failed.
    #[error(transparent)]
    TokenStore(#[from] TokenStoreError),
}

/// Standard `{ success, data, pagination }` response wrapper.
///
/// Bodies with `"success": false` never reach this type; they are reported
/// as [`ApiError::Status`] whatever the HTTP status.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    /// Whether the API considers the call successful
    #[serde(default = "default_true")]
    pub success: bool,

    /// Payload
    pub data: T,

    /// Paging details for list endpoints
    #[serde(default)]
    pub pagination: Option<Pagination>,

    /// Optional message
    #[serde(default)]
    pub message: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Paging details
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    /// Current page, starting at 1
    pub page: u32,

    /// Page size
    pub limit: u32,

    /// Total matching records
    pub total: u64,

    /// Total pages
    #[serde(default)]
    pub pages: u32,
}

/// One page of a list endpoint.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// Records on this page
    pub items: Vec<T>,

    /// Paging details, when the API sends them
    pub pagination: Option<Pagination>,
}

impl<T> From<Envelope<Vec<T>>> for Page<T> {
    fn from(envelope: Envelope<Vec<T>>) -> Self {
        Self {
            items: envelope.data,
            pagination: envelope.pagination,
        }
    }
}

/// Query parameters shared by the list endpoints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListParams {
    /// Page number, starting at 1
    pub page: Option<u32>,

    /// Page size
    pub limit: Option<u32>,

    /// Category filter
    pub category: Option<String>,

    /// Brand filter
    pub brand: Option<String>,

    /// Pet type filter
    pub pet_type: Option<String>,

    /// Sort key understood by the API
    pub sort: Option<String>,

    /// Minimum price
    pub min_price: Option<f64>,

    /// Maximum price
    pub max_price: Option<f64>,
}

impl ListParams {
    /// Query string pairs for the populated fields.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();

        push(&mut query, "page", self.page);
        push(&mut query, "limit", self.limit);
        push(&mut query, "category", self.category.as_ref());
        push(&mut query, "brand", self.brand.as_ref());
        push(&mut query, "petType", self.pet_type.as_ref());
        push(&mut query, "sort", self.sort.as_ref());
        push(&mut query, "minPrice", self.min_price);
        push(&mut query, "maxPrice", self.max_price);

        query
    }
}

fn push(query: &mut Vec<(String, String)>, key: &str, value: Option<impl ToString>) {
    if let Some(value) = value {
        query.push((key.to_string(), value.to_string()));
    }
}

/// `/health` response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthStatus {
    /// Service status, `"OK"` when healthy
    pub status: String,

    /// Server time
    #[serde(default)]
    pub timestamp: Option<String>,

    /// Server uptime in seconds
    #[serde(default)]
    pub uptime: Option<f64>,

    /// Deployment environment
    #[serde(default)]
    pub environment: Option<String>,
}

/// Storefront API client.
#[derive(Debug)]
pub struct ApiClient<T, S> {
    base_url: String,
    transport: T,
    tokens: S,
}

impl<T: Transport, S: TokenStore> ApiClient<T, S> {
    /// Create a client for the API rooted at `base_url`, e.g. `http://localhost:5000/api`.
    pub fn new(base_url: impl Into<String>, transport: T, tokens: S) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            base_url,
            transport,
            tokens,
        }
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Token store used for the `Authorization` header.
    pub fn tokens(&self) -> &S {
        &self.tokens
    }

    /// `GET /health`
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the API is unhealthy.
    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.get("/health", Vec::new()).await
    }

    pub(crate) async fn get<R: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<R, ApiError> {
        self.request(Method::Get, path, query, None).await
    }

    pub(crate) async fn post<R: DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<R, ApiError> {
        self.request(Method::Post, path, Vec::new(), Some(body))
            .await
    }

    async fn request<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<serde_json::Value>,
    ) -> Result<R, ApiError> {
        let request = ApiRequest {
            method,
            url: format!("{}{path}", self.base_url),
            query,
            bearer: self.tokens.token(),
            body,
        };

        let url = request.url.clone();

        debug!(%method, %url, "sending api request");

        let result = self.dispatch(request).await;

        if let Err(error) = &result {
            warn!(%method, %url, %error, "api request failed");
        }

        result
    }

    async fn dispatch<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        let response = self.transport.send(request).await?;

        if response.status == 401 {
            self.tokens.clear()?;

            return Err(ApiError::Unauthorized(error_message(&response)));
        }

        if !(200..300).contains(&response.status) {
            return Err(ApiError::Status {
                status: response.status,
                message: error_message(&response),
            });
        }

        if let Ok(outcome) = serde_json::from_str::<Outcome>(&response.body)
            && !outcome.success
        {
            return Err(ApiError::Status {
                status: response.status,
                message: outcome
                    .message
                    .unwrap_or_else(|| "request was not successful".to_string()),
            });
        }

        Ok(serde_json::from_str(&response.body)?)
    }
}

#[derive(Deserialize)]
struct Outcome {
    #[serde(default = "default_true")]
    success: bool,

    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(alias = "error")]
    message: String,
}

/// Pull `message` (or `error`) out of a JSON error body, falling back to the raw text.
fn error_message(response: &ApiResponse) -> String {
    serde_json::from_str::<ErrorBody>(&response.body)
        .map(|body| body.message)
        .unwrap_or_else(|_err| response.body.trim().to_string())
}

/// Check an id is safe to splice into a URL path.
pub(crate) fn path_id(id: &str) -> Result<&str, ApiError> {
    let trimmed = id.trim();

    if trimmed.is_empty() || trimmed.contains(['/', '?', '#', '%']) {
        return Err(ApiError::InvalidId(id.to_string()));
    }

    Ok(trimmed)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub(crate) const BASE_URL: &str = "http://api.test/api";

    pub(crate) fn ok(body: &str) -> Result<ApiResponse, TransportError> {
        Ok(ApiResponse {
            status: 200,
            body: body.to_string(),
        })
    }

    pub(crate) fn client(transport: MockTransport) -> ApiClient<MockTransport, MemoryTokenStore> {
        ApiClient::new(BASE_URL, transport, MemoryTokenStore::new())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use testresult::TestResult;
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::{
        Layer,
        layer::{Context, SubscriberExt},
    };

    use super::{test_support::*, *};

    #[derive(Clone, Debug, Default)]
    struct WarnCounter(Arc<AtomicUsize>);

    impl WarnCounter {
        fn count(&self) -> usize {
            self.0.load(Ordering::SeqCst)
        }
    }

    impl<S: Subscriber> Layer<S> for WarnCounter {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn failing_client(
        status: u16,
        body: &'static str,
    ) -> ApiClient<MockTransport, MemoryTokenStore> {
        let mut transport = MockTransport::new();

        transport.expect_send().once().returning(move |_| {
            Ok(ApiResponse {
                status,
                body: body.to_string(),
            })
        });

        ApiClient::new(BASE_URL, transport, MemoryTokenStore::with_token("jwt-123"))
    }

    #[tokio::test]
    async fn every_failure_logs_one_warning() {
        let warnings = WarnCounter::default();
        let _guard =
            tracing::subscriber::set_default(tracing_subscriber::registry().with(warnings.clone()));

        let unauthorized = failing_client(401, r#"{"message":"Token expired"}"#)
            .health()
            .await;

        assert!(matches!(unauthorized, Err(ApiError::Unauthorized(_))));
        assert_eq!(warnings.count(), 1);

        let server_error = failing_client(500, "upstream exploded").health().await;

        assert!(matches!(server_error, Err(ApiError::Status { status: 500, .. })));
        assert_eq!(warnings.count(), 2);
    }

    #[tokio::test]
    async fn success_logs_no_warning() -> TestResult {
        let warnings = WarnCounter::default();
        let _guard =
            tracing::subscriber::set_default(tracing_subscriber::registry().with(warnings.clone()));

        let mut transport = MockTransport::new();

        transport
            .expect_send()
            .once()
            .returning(|_| ok(r#"{"status":"OK"}"#));

        client(transport).health().await?;

        assert_eq!(warnings.count(), 0);

        Ok(())
    }

    #[tokio::test]
    async fn health_hits_health_endpoint() -> TestResult {
        let mut transport = MockTransport::new();

        transport
            .expect_send()
            .once()
            .withf(|request| {
                request.method == Method::Get
                    && request.url == "http://api.test/api/health"
                    && request.bearer.is_none()
            })
            .returning(|_| ok(r#"{"status":"OK","uptime":12.5}"#));

        let health = client(transport).health().await?;

        assert_eq!(health.status, "OK");
        assert_eq!(health.uptime, Some(12.5));

        Ok(())
    }

    #[tokio::test]
    async fn stored_token_is_sent_as_bearer() -> TestResult {
        let mut transport = MockTransport::new();

        transport
            .expect_send()
            .once()
            .withf(|request| request.bearer.as_deref() == Some("jwt-123"))
            .returning(|_| ok(r#"{"status":"OK"}"#));

        let client = ApiClient::new(BASE_URL, transport, MemoryTokenStore::with_token("jwt-123"));

        client.health().await?;

        assert_eq!(client.tokens().token().as_deref(), Some("jwt-123"));

        Ok(())
    }

    #[tokio::test]
    async fn unauthorized_response_clears_token() {
        let mut transport = MockTransport::new();

        transport.expect_send().once().returning(|_| {
            Ok(ApiResponse {
                status: 401,
                body: r#"{"message":"Token expired"}"#.to_string(),
            })
        });

        let client = ApiClient::new(BASE_URL, transport, MemoryTokenStore::with_token("stale"));

        let result = client.health().await;

        assert!(matches!(
            result,
            Err(ApiError::Unauthorized(message)) if message == "Token expired"
        ));
        assert_eq!(client.tokens().token(), None);
    }

    #[tokio::test]
    async fn server_error_keeps_token_and_propagates() {
        let mut transport = MockTransport::new();

        transport.expect_send().once().returning(|_| {
            Ok(ApiResponse {
                status: 500,
                body: "upstream exploded".to_string(),
            })
        });

        let client = ApiClient::new(BASE_URL, transport, MemoryTokenStore::with_token("jwt-123"));

        let result = client.health().await;

        assert!(matches!(
            result,
            Err(ApiError::Status { status: 500, message }) if message == "upstream exploded"
        ));
        assert_eq!(client.tokens().token().as_deref(), Some("jwt-123"));
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let mut transport = MockTransport::new();

        transport
            .expect_send()
            .once()
            .returning(|_| ok("<html>not json</html>"));

        let result = client(transport).health().await;

        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[tokio::test]
    async fn unsuccessful_envelope_is_an_error_despite_ok_status() {
        let mut transport = MockTransport::new();

        transport
            .expect_send()
            .once()
            .returning(|_| {
                ok(r#"{"success":false,"message":"Food not available","data":null}"#)
            });

        let client = ApiClient::new(BASE_URL, transport, MemoryTokenStore::with_token("jwt-123"));

        let result = client.food_categories().await;

        assert!(matches!(
            result,
            Err(ApiError::Status { status: 200, message }) if message == "Food not available"
        ));
        assert_eq!(client.tokens().token().as_deref(), Some("jwt-123"));
    }

    #[test]
    fn list_params_only_emit_populated_fields() {
        let params = ListParams {
            page: Some(2),
            brand: Some("Acana".to_string()),
            max_price: Some(50.0),
            ..ListParams::default()
        };

        assert_eq!(
            params.to_query(),
            vec![
                ("page".to_string(), "2".to_string()),
                ("brand".to_string(), "Acana".to_string()),
                ("maxPrice".to_string(), "50".to_string()),
            ]
        );
    }

    #[test]
    fn path_id_rejects_reserved_characters() {
        assert!(path_id("65f1c0ffee").is_ok());
        assert!(matches!(path_id("../admin"), Err(ApiError::InvalidId(_))));
        assert!(matches!(path_id("  "), Err(ApiError::InvalidId(_))));
    }
}
