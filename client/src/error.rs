//! Error types for the TrafficPortal API client.
//!
//! # Design
//! One variant per failure class the caller branches on: authentication
//! problems suggest checking credentials, validation problems suggest a
//! duplicate key or malformed field, transport problems suggest checking
//! connectivity. The classes are mutually exclusive; a single call raises
//! exactly one of them.

use std::fmt;

/// Errors returned by `TrafficPortalClient::create_masked_record`.
#[derive(Debug)]
pub enum ApiError {
    /// Connectivity, DNS, TLS, or timeout failure, or a response body that
    /// could not be decoded as JSON. No HTTP status is available.
    Transport(String),

    /// The server returned 401 or 403 — the credential was rejected.
    Authentication { status: u16, message: String },

    /// The server returned 400, 422, or another 4xx — the payload was
    /// rejected, e.g. a duplicate key.
    Validation { status: u16, message: String },

    /// The server returned any other non-2xx status, typically 5xx.
    Http { status: u16, message: String },
}

impl ApiError {
    /// HTTP status carried by the error, if the exchange reached the server.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Transport(_) => None,
            ApiError::Authentication { status, .. }
            | ApiError::Validation { status, .. }
            | ApiError::Http { status, .. } => Some(*status),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "transport error: {msg}"),
            ApiError::Authentication { status, message } => {
                write!(f, "authentication failed (HTTP {status}): {message}")
            }
            ApiError::Validation { status, message } => {
                write!(f, "validation failed (HTTP {status}): {message}")
            }
            ApiError::Http { status, message } => {
                write!(f, "HTTP {status}: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
