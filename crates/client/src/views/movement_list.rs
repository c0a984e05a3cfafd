//! Stock movement history screen.

use inventory_panel_core::filter::MovementFilter;
use inventory_panel_core::models::Movement;
use inventory_panel_core::routes::Route;
use tracing::{error, instrument};

use super::{DisposeHandle, Effects, Lifecycle};
use crate::api::ApiClient;
use crate::notice::Notice;
use crate::session::SessionContext;

/// All movements with a local kind filter.
#[derive(Debug)]
pub struct MovementListView {
    api: ApiClient,
    session: SessionContext,
    lifecycle: Lifecycle,
    loading: bool,
    movements: Vec<Movement>,
    filter: MovementFilter,
}

impl MovementListView {
    #[must_use]
    pub fn new(api: ApiClient, session: SessionContext) -> Self {
        Self {
            api,
            session,
            lifecycle: Lifecycle::default(),
            loading: true,
            movements: Vec::new(),
            filter: MovementFilter::All,
        }
    }

    /// Load every movement. A failure leaves the list empty and yields an
    /// error notice.
    #[instrument(skip(self))]
    pub async fn init(&mut self) -> Effects {
        self.loading = true;
        let result = self.api.list_movements(&self.session).await;
        if self.lifecycle.is_disposed() {
            return Effects::none();
        }
        self.loading = false;
        match result {
            Ok(movements) => {
                self.movements = movements;
                Effects::none()
            }
            Err(e) => {
                error!(error = %e, "Failed to load movements");
                Effects::notice(Notice::from_api_error(&e, "Error loading movements"))
            }
        }
    }

    /// Change the kind filter. The unfiltered list is kept, so switching
    /// back to `All` needs no reload.
    pub const fn set_filter(&mut self, filter: MovementFilter) {
        self.filter = filter;
    }

    #[must_use]
    pub const fn filter(&self) -> MovementFilter {
        self.filter
    }

    /// Movements passing the filter, in server order.
    #[must_use]
    pub fn visible(&self) -> Vec<Movement> {
        self.filter.apply(&self.movements)
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub const fn new_movement_route() -> Route {
        Route::NewMovement
    }

    #[must_use]
    pub fn dispose_handle(&self) -> DisposeHandle {
        self.lifecycle.handle()
    }

    pub fn dispose(&self) {
        self.lifecycle.dispose();
    }
}
