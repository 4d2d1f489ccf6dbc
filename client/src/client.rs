//! Authenticated client for the TrafficPortal create-masked-record endpoint.
//!
//! # Design
//! `TrafficPortalClient` holds only immutable configuration (endpoint,
//! credential, timeout) plus the transport implementation, so one instance
//! is safe for concurrent use. The single operation is split the same way
//! as every exchange in this workspace: `build_create_masked_record`
//! produces an `HttpRequest`, `parse_create_masked_record` interprets an
//! `HttpResponse`, and `create_masked_record` composes the two around one
//! blocking [`Transport::send`]. Each call is exactly one network exchange —
//! no retries, no backoff.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use log::debug;
use serde_json::Value;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
use crate::types::{CreateMapRequest, CreateMapResponse};

/// Fixed resource path for masked-record creation, relative to the base
/// endpoint.
const CREATE_MAP_PATH: &str = "create-map";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the TrafficPortal masked-record API.
///
/// Immutable after construction; the credential has no accessor and is
/// masked out of the `Debug` representation.
#[derive(Clone)]
pub struct TrafficPortalClient {
    api_endpoint: String,
    api_key: String,
    timeout: Duration,
    transport: Arc<dyn Transport>,
}

impl TrafficPortalClient {
    /// Build a client with the default ureq transport and a 30 second
    /// timeout. Exactly one trailing `/` is stripped from the endpoint.
    pub fn new(api_endpoint: &str, api_key: &str) -> Self {
        Self::with_transport(api_endpoint, api_key, Arc::new(UreqTransport))
    }

    /// Build a client over a caller-supplied [`Transport`].
    pub fn with_transport(api_endpoint: &str, api_key: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            api_endpoint: api_endpoint
                .strip_suffix('/')
                .unwrap_or(api_endpoint)
                .to_string(),
            api_key: api_key.to_string(),
            timeout: DEFAULT_TIMEOUT,
            transport,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Create a masked record: serialize, send one authenticated POST, and
    /// interpret the outcome.
    ///
    /// # Errors
    /// [`ApiError::Transport`] when the exchange never completed or the
    /// response body was undecodable; [`ApiError::Authentication`] on
    /// 401/403; [`ApiError::Validation`] on other 4xx (e.g. a duplicate
    /// key); [`ApiError::Http`] on any remaining non-2xx status.
    pub fn create_masked_record(
        &self,
        request: &CreateMapRequest,
    ) -> Result<CreateMapResponse, ApiError> {
        let http_request = self.build_create_masked_record(request)?;
        debug!("POST {}", http_request.url);

        let response = self
            .transport
            .send(&http_request, self.timeout)
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        debug!("{} returned HTTP {}", CREATE_MAP_PATH, response.status);

        self.parse_create_masked_record(response)
    }

    pub fn build_create_masked_record(
        &self,
        request: &CreateMapRequest,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(request)
            .map_err(|e| ApiError::Transport(format!("failed to encode request body: {e}")))?;

        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/{}", self.api_endpoint, CREATE_MAP_PATH),
            headers: vec![
                ("x-api-key".to_string(), self.api_key.clone()),
                ("content-type".to_string(), "application/json".to_string()),
            ],
            body: Some(body),
        })
    }

    pub fn parse_create_masked_record(
        &self,
        response: HttpResponse,
    ) -> Result<CreateMapResponse, ApiError> {
        if !(200..=299).contains(&response.status) {
            return Err(classify_status(response.status, &response.body));
        }

        let value: Value = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::Transport(format!("failed to decode response body: {e}")))?;
        Ok(CreateMapResponse::from_value(&value))
    }
}

impl fmt::Debug for TrafficPortalClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrafficPortalClient")
            .field("api_endpoint", &self.api_endpoint)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Map a non-2xx status and its body to the matching `ApiError` variant:
/// 401/403 are authentication failures, every other 4xx is a validation
/// failure, anything else is a generic HTTP failure.
fn classify_status(status: u16, body: &str) -> ApiError {
    let message = error_message(status, body);
    match status {
        401 | 403 => ApiError::Authentication { status, message },
        400..=499 => ApiError::Validation { status, message },
        _ => ApiError::Http { status, message },
    }
}

/// Prefer the server's JSON `message` field, fall back to the raw body,
/// then to a generic line naming the status.
fn error_message(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(message) = value.get("message").and_then(Value::as_str) {
            return message.to_string();
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("request failed with HTTP status {status}")
    } else {
        trimmed.to_string()
    }
}
