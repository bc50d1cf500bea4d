//! Unified error handling for the proxy.
//!
//! Every failure on the forwarding path renders the same way: HTTP 500 with a
//! `{"error": "<message>"}` body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

/// Error type for a single proxied request.
#[derive(Debug, Clone)]
pub enum ProxyError {
    /// The caller's body could not be turned into an upstream request.
    InvalidRequest(String),
    /// The upstream call failed before a response arrived.
    Upstream(String),
    /// The upstream response body was not valid JSON.
    Parse(String),
}

impl fmt::Display for ProxyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRequest(msg)
            | Self::Upstream(msg)
            | Self::Parse(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ProxyError {}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        Self::Upstream(err.to_string())
    }
}

/// Error response structure for JSON serialization.
#[derive(Serialize)]
struct ErrorResponseBody {
    error: String,
}

impl ProxyError {
    /// Get the HTTP status code for this error.
    ///
    /// Callers only ever see a 500 from the gateway itself; upstream statuses
    /// are relayed inside the body, never through this path.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    /// Short label used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "invalid_request",
            Self::Upstream(_) => "upstream_error",
            Self::Parse(_) => "parse_error",
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = ErrorResponseBody {
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
