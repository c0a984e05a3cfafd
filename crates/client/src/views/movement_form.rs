//! New stock movement screen.

use inventory_panel_core::models::Product;
use inventory_panel_core::routes::Route;
use inventory_panel_core::validation::{FormState, MovementDraft};
use tracing::{error, instrument};

use super::{DisposeHandle, Effects, Lifecycle};
use crate::api::ApiClient;
use crate::notice::Notice;
use crate::session::SessionContext;

/// Movement form with a product picker.
#[derive(Debug)]
pub struct MovementFormView {
    api: ApiClient,
    session: SessionContext,
    lifecycle: Lifecycle,
    loading: bool,
    submitting: bool,
    products: Vec<Product>,
    new_stock: Option<u32>,
    pub form: FormState<MovementDraft>,
}

impl MovementFormView {
    #[must_use]
    pub fn new(api: ApiClient, session: SessionContext) -> Self {
        Self {
            api,
            session,
            lifecycle: Lifecycle::default(),
            loading: true,
            submitting: false,
            products: Vec::new(),
            new_stock: None,
            form: FormState::new(MovementDraft::default()),
        }
    }

    /// Load the products offered in the picker.
    #[instrument(skip(self))]
    pub async fn init(&mut self) -> Effects {
        let result = self.api.list_products(&self.session).await;
        if self.lifecycle.is_disposed() {
            return Effects::none();
        }
        self.loading = false;
        match result {
            Ok(products) => {
                self.products = products;
                Effects::none()
            }
            Err(e) => {
                error!(error = %e, "Failed to load products");
                Effects::notice(Notice::from_api_error(&e, "Error loading products"))
            }
        }
    }

    /// Validate and record the movement.
    ///
    /// Outbound quantities are not checked against stock here; the server
    /// rejects them and its message is shown.
    #[instrument(skip(self))]
    pub async fn submit(&mut self) -> Effects {
        let Ok(request) = self.form.submit() else {
            return Effects::none();
        };

        self.submitting = true;
        let result = self.api.create_movement(&self.session, &request).await;
        if self.lifecycle.is_disposed() {
            return Effects::none();
        }

        match result {
            Ok(created) => {
                self.new_stock = Some(created.new_stock);
                Effects::notice(Notice::server_success(&created.message, "Movement recorded"))
                    .then(Route::Movements)
            }
            Err(e) => {
                error!(error = %e, "Failed to record movement");
                self.submitting = false;
                Effects::notice(Notice::from_api_error(&e, "Error recording movement"))
            }
        }
    }

    #[must_use]
    pub const fn cancel(&self) -> Effects {
        Effects {
            notice: None,
            redirect: Some(Route::Movements),
        }
    }

    /// Products offered in the picker.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Stock of the product after the last successful submit.
    #[must_use]
    pub const fn new_stock(&self) -> Option<u32> {
        self.new_stock
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    #[must_use]
    pub fn dispose_handle(&self) -> DisposeHandle {
        self.lifecycle.handle()
    }

    pub fn dispose(&self) {
        self.lifecycle.dispose();
    }
}
