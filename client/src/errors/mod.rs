//! Global error types for the API access layer.
//!
//! This module defines the error taxonomy surfaced by the gateway and the
//! typed endpoint wrappers: session expiry, HTTP-level failures, network
//! failures, and malformed response bodies.

use thiserror::Error;

/// Fallback message when an error body is not JSON or lacks a `message` field.
pub const DEFAULT_ERROR_MESSAGE: &str = "An error occurred";

/// Errors surfaced by API calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No valid credential could be obtained; the caller must re-authenticate.
    #[error("Session expired. Please log in again.")]
    SessionExpired,

    /// A non-2xx response other than a recoverable 401, carrying the status
    /// code and the message extracted from the response body.
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    /// The call could not be completed at all (no response received).
    /// Never retried by the gateway.
    #[error("Network error: {0}")]
    Network(String),

    /// A successful response whose body did not match the expected shape.
    #[error("Response decode error: {0}")]
    Decode(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    // Helper constructors for common patterns

    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Returns the HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the error means the session is gone and login is required.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }
}
