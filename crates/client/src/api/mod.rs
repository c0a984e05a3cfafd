//! Inventory API client.
//!
//! One [`ApiClient`] serves every resource group. Each operation performs
//! exactly one round trip: no retries, caching or request coalescing.
//!
//! # Resource groups
//!
//! - **auth**: register, login, profile
//! - **products**: CRUD plus low-stock and by-category listings
//! - **categories**: CRUD
//! - **movements**: list, get, by kind, by product, create, delete
//! - **dashboard**: stats, recent movements, low-stock alerts, movement
//!   summary, top products
//!
//! Authenticated calls take a [`SessionContext`]; when it holds a token the
//! request carries `Authorization: Bearer <token>`. Without one the request
//! is still sent and the server decides.

mod auth;
mod categories;
mod dashboard;
mod movements;
mod products;
mod types;

pub use dashboard::DashboardSnapshot;
pub use types::*;

use std::sync::Arc;

use reqwest::{Method, RequestBuilder};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::session::SessionContext;

/// Inventory API client.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is invalid or the HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        Url::parse(&config.api_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.api_url.trim_end_matches('/').to_owned(),
            }),
        })
    }

    /// Base URL every path is appended to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        session: &SessionContext,
    ) -> Result<RequestBuilder, ApiError> {
        let url = Url::parse(&format!("{}{path}", self.inner.base_url))?;
        let mut request = self.inner.client.request(method, url);
        if let Some(token) = session.token() {
            request = request.bearer_auth(token.expose_secret());
        }
        Ok(request)
    }

    /// Execute a GET request.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        session: &SessionContext,
        path: &str,
    ) -> Result<T, ApiError> {
        let response = self.request(Method::GET, path, session)?.send().await?;
        Self::handle_response(response).await
    }

    /// Execute a POST request with a JSON body.
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        session: &SessionContext,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .request(Method::POST, path, session)?
            .json(body)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Execute a PUT request with a JSON body.
    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        session: &SessionContext,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .request(Method::PUT, path, session)?
            .json(body)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Execute a DELETE request.
    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        session: &SessionContext,
        path: &str,
    ) -> Result<T, ApiError> {
        let response = self.request(Method::DELETE, path, session)?.send().await?;
        Self::handle_response(response).await
    }

    /// Decode a success body or turn the response into an [`ApiError`].
    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();

        if status.is_success() {
            let bytes = response.bytes().await?;
            return serde_json::from_slice(&bytes)
                .map_err(|e| ApiError::Parse(format!("Failed to parse response: {e}")));
        }

        Err(Self::parse_error(response).await)
    }

    /// Extract the `{"error": "..."}` message from a failed response.
    async fn parse_error(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let message = response
            .bytes()
            .await
            .ok()
            .and_then(|body| serde_json::from_slice::<ErrorBody>(&body).ok())
            .and_then(|body| body.error)
            .filter(|m| !m.is_empty());

        ApiError::from_status(status, message)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}
