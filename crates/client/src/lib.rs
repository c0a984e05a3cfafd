//! Inventory Panel Client - HTTP client, sessions and screen state.
//!
//! This crate talks to the inventory REST API on behalf of a signed-in
//! user:
//!
//! - [`api`] - One client for auth, products, categories, movements and dashboard
//! - [`session`] - Session snapshot passed to each call, plus its persistence
//! - [`storage`] - Key/value backends for the session (memory, JSON file)
//! - [`views`] - Per-screen state with `init`/`dispose` hooks
//! - [`notice`] - Transient user-facing messages
//! - [`config`] - Environment-driven configuration
//!
//! # Example
//!
//! ```no_run
//! use inventory_panel_client::api::ApiClient;
//! use inventory_panel_client::config::ClientConfig;
//! use inventory_panel_client::session::SessionStore;
//! use inventory_panel_client::storage::FileStorage;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::from_env()?;
//! let api = ApiClient::new(&config)?;
//! let store = SessionStore::new(FileStorage::new(&config.session_file));
//! let session = store.load()?;
//! let products = api.list_products(&session).await?;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod notice;
pub mod session;
pub mod storage;
pub mod views;

pub use api::ApiClient;
pub use config::{ClientConfig, ConfigError};
pub use error::ApiError;
pub use session::{SessionContext, SessionStore};
