//! Integration tests for the Inventory Panel client.
//!
//! Tests run the client crate end to end against a `wiremock` server that
//! speaks the inventory API, with sessions persisted to a temporary file.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p inventory-panel-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `session_lifecycle` - Login, persistence, navigation gate and logout
//! - `product_catalog` - Product list filters and the product form
//! - `stock_movements` - Recording, listing and deleting movements
//! - `dashboard` - All-or-nothing dashboard loading

#![allow(clippy::missing_panics_doc)]

use std::path::PathBuf;

use inventory_panel_client::ApiClient;
use inventory_panel_client::config::ClientConfig;
use inventory_panel_client::session::{SessionContext, SessionStore};
use inventory_panel_client::storage::FileStorage;
use inventory_panel_core::models::{AuthResponse, User};
use inventory_panel_core::types::{Role, UserId};
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Token handed out by [`TestContext::sign_in`].
pub const TEST_TOKEN: &str = "integration-token";

/// A mock API server, a client pointed at it and a scratch directory for
/// the session file.
pub struct TestContext {
    pub server: MockServer,
    pub api: ApiClient,
    dir: TempDir,
}

impl TestContext {
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let config = ClientConfig::default()
            .with_api_url(&format!("{}/api", server.uri()))
            .expect("mock server URL is a valid base URL");
        let api = ApiClient::new(&config).expect("client builds");
        let dir = tempfile::tempdir().expect("temp dir");
        Self { server, api, dir }
    }

    /// Path of the session file.
    #[must_use]
    pub fn session_file(&self) -> PathBuf {
        self.dir.path().join("session.json")
    }

    /// A fresh store over the session file, as a new process would open it.
    #[must_use]
    pub fn store(&self) -> SessionStore<FileStorage> {
        SessionStore::new(FileStorage::new(self.session_file()))
    }

    /// Persist a session for a user with `role` and return it.
    #[must_use]
    pub fn sign_in(&self, role: Role) -> SessionContext {
        self.store()
            .establish(&AuthResponse {
                message: String::new(),
                token: TEST_TOKEN.to_owned(),
                user: user(role),
            })
            .expect("session persists")
    }

    /// Answer `verb path` with `status` and a JSON body.
    pub async fn mount(&self, verb: &str, route: &str, status: u16, body: Value) {
        Mock::given(method(verb))
            .and(path(format!("/api{route}")))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }
}

/// Profile used for signed-in sessions.
#[must_use]
pub fn user(role: Role) -> User {
    User {
        id: UserId::new(7),
        username: "marta".to_owned(),
        email: "marta@example.com".to_owned(),
        role,
        created_at: None,
        updated_at: None,
    }
}

/// Wire form of [`user`].
#[must_use]
pub fn user_json(role: &str) -> Value {
    json!({"id": 7, "username": "marta", "email": "marta@example.com", "role": role})
}

#[must_use]
pub fn category_json(id: u64, name: &str) -> Value {
    json!({"id": id, "name": name, "description": ""})
}

/// Wire form of a product with an embedded category.
#[must_use]
pub fn product_json(id: u64, name: &str, category: Option<(u64, &str)>, stock: u32) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": format!("{name} de prueba"),
        "category_id": category.map(|(id, _)| id),
        "category": category.map(|(id, name)| category_json(id, name)),
        "price": 12.5,
        "stock": stock,
        "image_url": "",
        "created_at": "2026-02-01T09:00:00Z"
    })
}

/// Wire form of a movement; `kind` is the server's name (`entrada`/`salida`).
#[must_use]
pub fn movement_json(id: u64, product: (u64, &str), kind: &str, quantity: u32) -> Value {
    json!({
        "id": id,
        "product_id": product.0,
        "product": {"id": product.0, "name": product.1, "price": 12.5, "stock": 10},
        "user_id": 7,
        "user": user_json("employee"),
        "type": kind,
        "quantity": quantity,
        "description": "",
        "movement_date": "2026-02-03T15:30:00Z"
    })
}
