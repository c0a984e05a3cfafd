//! Subcommand implementations.
//!
//! Commands drive the same view models as the panel screens and print what
//! the screen would show. Navigation effects are ignored; notices become
//! output or errors.

pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod movements;
pub mod products;

use inventory_panel_client::ApiClient;
use inventory_panel_client::config::{ClientConfig, ConfigError};
use inventory_panel_client::error::ApiError;
use inventory_panel_client::session::{SessionContext, SessionStore};
use inventory_panel_client::storage::{FileStorage, StorageError};
use inventory_panel_client::views::Effects;
use inventory_panel_core::routes::Route;
use inventory_panel_core::types::CategoryId;
use inventory_panel_core::validation::ValidationErrors;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::output;

/// Errors surfaced by a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Invalid input: {0}")]
    Invalid(#[from] ValidationErrors),

    /// The server or the view refused the operation.
    #[error("{0}")]
    Rejected(String),

    #[error("Not signed in. Run `inv-cli login` first")]
    NotSignedIn,

    #[error("{0} requires the admin role")]
    AdminRequired(Route),
}

/// Field overrides for the product form. `None` keeps the form's value.
#[derive(Debug, Default)]
pub struct ProductFields {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<CategoryId>,
    pub price: Option<Decimal>,
    pub stock: Option<i64>,
    pub image_url: Option<String>,
}

/// Client, persisted session and its current snapshot.
pub struct Context {
    pub api: ApiClient,
    pub store: SessionStore<FileStorage>,
    pub session: SessionContext,
}

impl Context {
    /// Load configuration and the stored session.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the session file
    /// cannot be read.
    pub fn from_env() -> Result<Self, CliError> {
        let config = ClientConfig::from_env()?;
        let api = ApiClient::new(&config)?;
        let store = SessionStore::new(FileStorage::new(&config.session_file));
        let session = store.load()?;
        debug!(
            api_url = %api.base_url(),
            authenticated = session.is_authenticated(),
            "Context loaded"
        );
        Ok(Self {
            api,
            store,
            session,
        })
    }

    /// Pass the navigation gate for `route` and hand out the session.
    ///
    /// # Errors
    ///
    /// Returns an error naming the reason the gate redirected.
    pub fn open(&self, route: Route) -> Result<SessionContext, CliError> {
        match self.session.resolve(route) {
            resolved if resolved == route => Ok(self.session.clone()),
            Route::Login => Err(CliError::NotSignedIn),
            _ => Err(CliError::AdminRequired(route)),
        }
    }

    /// Like [`Self::open`] for actions that have no screen of their own.
    ///
    /// # Errors
    ///
    /// Returns an error unless the session belongs to an admin.
    pub fn open_admin(&self, action: Route) -> Result<SessionContext, CliError> {
        let session = self.open(action)?;
        if session.is_admin() {
            Ok(session)
        } else {
            Err(CliError::AdminRequired(action))
        }
    }
}

/// Print a success notice or turn an error notice into a failure.
///
/// # Errors
///
/// Returns [`CliError::Rejected`] when the effects carry an error notice.
pub fn finish(effects: Effects) -> Result<(), CliError> {
    if let Some(route) = effects.redirect {
        debug!(%route, "Ignoring navigation");
    }
    match effects.notice {
        Some(notice) if notice.is_error() => Err(CliError::Rejected(notice.text)),
        Some(notice) => {
            output::notice(&notice);
            Ok(())
        }
        None => Ok(()),
    }
}
