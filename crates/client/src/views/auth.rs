//! Login, registration and logout.

use inventory_panel_core::models::AuthResponse;
use inventory_panel_core::routes::Route;
use inventory_panel_core::validation::{FormState, LoginDraft, RegisterDraft};
use tracing::{error, info, instrument};

use super::Effects;
use crate::api::ApiClient;
use crate::clock::Clock;
use crate::error::ApiError;
use crate::notice::Notice;
use crate::session::{SessionContext, SessionStore};
use crate::storage::SessionStorage;

/// Persist a successful auth response and build the resulting effects.
fn complete<S: SessionStorage, C: Clock>(
    store: &mut SessionStore<S, C>,
    result: Result<AuthResponse, ApiError>,
    welcome: &str,
    fallback: &str,
) -> (Effects, Option<SessionContext>) {
    let established = result.and_then(|response| {
        let session = store.establish(&response)?;
        Ok((response.message, session))
    });

    match established {
        Ok((message, session)) => {
            info!("Session started");
            (
                Effects::notice(Notice::server_success(&message, welcome)).then(Route::HOME),
                Some(session),
            )
        }
        Err(e) => {
            error!(error = %e, "Authentication failed");
            (Effects::notice(Notice::from_api_error(&e, fallback)), None)
        }
    }
}

/// Login form.
#[derive(Debug)]
pub struct LoginView {
    api: ApiClient,
    submitting: bool,
    session: Option<SessionContext>,
    pub form: FormState<LoginDraft>,
}

impl LoginView {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            submitting: false,
            session: None,
            form: FormState::default(),
        }
    }

    /// Validate, log in and persist the session.
    ///
    /// On success the new session is available from [`Self::session`] and
    /// the effects navigate to the dashboard.
    #[instrument(skip(self, store))]
    pub async fn submit<S: SessionStorage, C: Clock>(
        &mut self,
        store: &mut SessionStore<S, C>,
    ) -> Effects {
        let Ok(request) = self.form.submit() else {
            return Effects::none();
        };
        self.submitting = true;
        let result = self.api.login(&request).await;
        let (effects, session) = complete(store, result, "Welcome", "Login failed");
        self.submitting = false;
        self.session = session;
        effects
    }

    /// Session established by the last successful submit.
    #[must_use]
    pub const fn session(&self) -> Option<&SessionContext> {
        self.session.as_ref()
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }
}

/// Registration form.
#[derive(Debug)]
pub struct RegisterView {
    api: ApiClient,
    submitting: bool,
    session: Option<SessionContext>,
    pub form: FormState<RegisterDraft>,
}

impl RegisterView {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            submitting: false,
            session: None,
            form: FormState::default(),
        }
    }

    /// Validate, register and persist the session.
    #[instrument(skip(self, store))]
    pub async fn submit<S: SessionStorage, C: Clock>(
        &mut self,
        store: &mut SessionStore<S, C>,
    ) -> Effects {
        let Ok(request) = self.form.submit() else {
            return Effects::none();
        };
        self.submitting = true;
        let result = self.api.register(&request).await;
        let (effects, session) =
            complete(store, result, "Account created", "Registration failed");
        self.submitting = false;
        self.session = session;
        effects
    }

    #[must_use]
    pub const fn session(&self) -> Option<&SessionContext> {
        self.session.as_ref()
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Whether the draft currently passes validation.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.form.is_valid()
    }
}

/// Forget the session and go to the login screen.
///
/// # Errors
///
/// Returns an error if the session storage cannot be written.
pub fn logout<S: SessionStorage, C: Clock>(
    store: &mut SessionStore<S, C>,
) -> Result<Effects, ApiError> {
    store.clear()?;
    info!("Logged out");
    Ok(Effects::redirect(Route::Login))
}
