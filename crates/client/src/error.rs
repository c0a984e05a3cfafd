//! Errors raised by the inventory API client.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur when talking to the inventory API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure: connection refused, timeout, TLS and the like.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response not covered by a more specific variant.
    #[error("API error {status}: {}", .message.as_deref().unwrap_or("no details"))]
    Api { status: u16, message: Option<String> },

    /// 401: missing, expired or invalid token.
    #[error("Unauthorized: {}", .0.as_deref().unwrap_or("missing or invalid token"))]
    Unauthorized(Option<String>),

    /// 403: the signed-in user lacks the required role.
    #[error("Forbidden: {}", .0.as_deref().unwrap_or("insufficient permissions"))]
    Forbidden(Option<String>),

    /// 404.
    #[error("Not found: {}", .0.as_deref().unwrap_or("resource not found"))]
    NotFound(Option<String>),

    /// Success response whose body could not be decoded.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Request URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Session persistence failed.
    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// The server's own `error` text, when the response carried one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => message.as_deref(),
            Self::Unauthorized(message) | Self::Forbidden(message) | Self::NotFound(message) => {
                message.as_deref()
            }
            Self::Http(_) | Self::Parse(_) | Self::Url(_) | Self::Storage(_) => None,
        }
    }

    /// HTTP status of an error response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Unauthorized(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Parse(_) | Self::Url(_) | Self::Storage(_) => None,
        }
    }

    /// Build the error for a non-success status and its decoded `error` text.
    #[must_use]
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        match status {
            401 => Self::Unauthorized(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            _ => Self::Api { status, message },
        }
    }
}
