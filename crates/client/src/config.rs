//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `INVENTORY_API_URL` - Base URL of the inventory API (default: `http://localhost:8080/api`)
//! - `INVENTORY_SESSION_FILE` - Where the CLI persists the session (default: `.inventory-session.json`)
//! - `INVENTORY_HTTP_TIMEOUT_SECS` - Per-request timeout in whole seconds, at least 1 (default: none)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Default session file path.
pub const DEFAULT_SESSION_FILE: &str = ".inventory-session.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Inventory API client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every resource path is appended to (no trailing slash)
    pub api_url: String,
    /// Session file used by file-backed storage
    pub session_file: PathBuf,
    /// Request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = get("INVENTORY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_owned());
        let api_url = normalize_api_url(&api_url)
            .map_err(|e| ConfigError::InvalidEnvVar("INVENTORY_API_URL".to_owned(), e))?;

        let session_file = get("INVENTORY_SESSION_FILE")
            .map_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE), PathBuf::from);

        let timeout = get("INVENTORY_HTTP_TIMEOUT_SECS")
            .map(|raw| parse_timeout(&raw))
            .transpose()
            .map_err(|e| ConfigError::InvalidEnvVar("INVENTORY_HTTP_TIMEOUT_SECS".to_owned(), e))?;

        Ok(Self {
            api_url,
            session_file,
            timeout,
        })
    }

    /// Override the API base URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `url` is not an absolute http(s) URL.
    pub fn with_api_url(mut self, url: &str) -> Result<Self, ConfigError> {
        self.api_url = normalize_api_url(url)
            .map_err(|e| ConfigError::InvalidEnvVar("INVENTORY_API_URL".to_owned(), e))?;
        Ok(self)
    }
}

/// Parse a whole number of seconds. Zero would fail every request at once.
fn parse_timeout(raw: &str) -> Result<Duration, String> {
    match raw.trim().parse::<u64>().map_err(|e| e.to_string())? {
        0 => Err("timeout must be at least 1 second".to_owned()),
        secs => Ok(Duration::from_secs(secs)),
    }
}

/// Validate a base URL and strip any trailing slash.
fn normalize_api_url(raw: &str) -> Result<String, String> {
    let parsed = Url::parse(raw.trim()).map_err(|e| e.to_string())?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme: {}", parsed.scheme()));
    }
    Ok(parsed.as_str().trim_end_matches('/').to_owned())
}
