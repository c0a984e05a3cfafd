//! Authentication endpoints.

use inventory_panel_core::models::{AuthResponse, LoginRequest, RegisterRequest, User};
use tracing::{debug, instrument};

use super::{ApiClient, ProfileResponse};
use crate::error::ApiError;
use crate::session::SessionContext;

impl ApiClient {
    /// Create an account and receive a token for it.
    ///
    /// # Errors
    ///
    /// Returns error if the email is taken, the payload is rejected, or the
    /// request fails.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        let response: AuthResponse = self
            .post(&SessionContext::anonymous(), "/auth/register", request)
            .await?;
        debug!(user_id = %response.user.id, "Registered");
        Ok(response)
    }

    /// Exchange credentials for a token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] on bad credentials, or another
    /// error if the request fails.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let response: AuthResponse = self
            .post(&SessionContext::anonymous(), "/auth/login", request)
            .await?;
        debug!(user_id = %response.user.id, role = %response.user.role, "Logged in");
        Ok(response)
    }

    /// Fetch the profile of the token's owner.
    ///
    /// # Errors
    ///
    /// Returns error if the token is missing or invalid, or the request fails.
    #[instrument(skip(self, session))]
    pub async fn profile(&self, session: &SessionContext) -> Result<User, ApiError> {
        let response: ProfileResponse = self.get(session, "/auth/profile").await?;
        Ok(response.user)
    }
}
