//! HTTP transport types and the transport seam.
//!
//! # Design
//! `HttpRequest` and `HttpResponse` describe HTTP exchanges as plain data
//! with owned fields. The client builds `HttpRequest` values and interprets
//! `HttpResponse` values; the actual network round-trip happens behind the
//! [`Transport`] trait, so tests can substitute canned responses without a
//! socket. [`UreqTransport`] is the production implementation.

use std::fmt;
use std::time::Duration;

/// HTTP method for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// A `HttpResponse` exists only once the server answered; failures below the
/// HTTP layer are a [`TransportError`] instead.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Failure below the HTTP layer: DNS, connect, TLS, or timeout. Carries the
/// underlying cause; no HTTP status is meaningful here.
#[derive(Debug, Clone)]
pub struct TransportError(pub String);

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for TransportError {}

/// Executes one HTTP exchange.
///
/// Implementations must return the server's response as data for every
/// completed exchange, whatever the status code; `Err` is reserved for
/// failures where no HTTP response exists.
pub trait Transport: Send + Sync {
    fn send(&self, request: &HttpRequest, timeout: Duration) -> Result<HttpResponse, TransportError>;
}

/// Production [`Transport`] backed by ureq.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses come back as data rather than `Err`, leaving status
/// interpretation to the client. The timeout bounds the whole exchange.
#[derive(Debug, Clone, Default)]
pub struct UreqTransport;

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest, timeout: Duration) -> Result<HttpResponse, TransportError> {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();

        let result = match (&request.method, &request.body) {
            (HttpMethod::Get, _) => with_headers(agent.get(&request.url), &request.headers).call(),
            (HttpMethod::Post, Some(body)) => {
                with_headers(agent.post(&request.url), &request.headers).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => {
                with_headers(agent.post(&request.url), &request.headers).send_empty()
            }
        };

        let mut response = result.map_err(|e| TransportError(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}
