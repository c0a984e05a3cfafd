//! Transient user-facing messages.

use std::fmt;

use crate::error::ApiError;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A short message shown once to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }

    /// Error notice carrying the server's message, or `fallback` without one.
    #[must_use]
    pub fn from_api_error(error: &ApiError, fallback: &str) -> Self {
        Self::error(error.server_message().unwrap_or(fallback))
    }

    /// Success notice with the server's message, or `fallback` if it was empty.
    #[must_use]
    pub fn server_success(message: &str, fallback: &str) -> Self {
        Self::success(if message.is_empty() { fallback } else { message })
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
