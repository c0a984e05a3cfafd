//! Screen state for the inventory panel.
//!
//! Each view owns the data one screen shows and exposes explicit `init` and
//! `dispose` hooks. Operations return [`Effects`]: a notice to show and/or a
//! route to navigate to. Disposing a view does not cancel requests already in
//! flight; their results are discarded when they arrive.

mod auth;
mod category_list;
mod dashboard;
mod movement_form;
mod movement_list;
mod product_detail;
mod product_form;
mod product_list;

pub use auth::{LoginView, RegisterView, logout};
pub use category_list::CategoryListView;
pub use dashboard::{DashboardState, DashboardView};
pub use movement_form::MovementFormView;
pub use movement_list::MovementListView;
pub use product_detail::{ProductDetailView, RECENT_MOVEMENTS_LIMIT};
pub use product_form::{FormMode, ProductFormView};
pub use product_list::ProductListView;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use inventory_panel_core::routes::Route;

use crate::notice::Notice;

/// Side effects the caller should apply after a view operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Effects {
    pub notice: Option<Notice>,
    pub redirect: Option<Route>,
}

impl Effects {
    /// Nothing to do.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn notice(notice: Notice) -> Self {
        Self {
            notice: Some(notice),
            redirect: None,
        }
    }

    #[must_use]
    pub fn redirect(route: Route) -> Self {
        Self {
            notice: None,
            redirect: Some(route),
        }
    }

    /// Add a redirect to these effects.
    #[must_use]
    pub const fn then(mut self, route: Route) -> Self {
        self.redirect = Some(route);
        self
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.notice.is_none() && self.redirect.is_none()
    }
}

/// Disposal flag shared between a view and its [`DisposeHandle`]s.
#[derive(Debug, Clone, Default)]
pub(crate) struct Lifecycle {
    disposed: Arc<AtomicBool>,
}

impl Lifecycle {
    pub(crate) fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    pub(crate) fn dispose(&self) {
        self.disposed.store(true, Ordering::Release);
    }

    pub(crate) fn handle(&self) -> DisposeHandle {
        DisposeHandle {
            disposed: Arc::clone(&self.disposed),
        }
    }
}

/// Disposes a view from outside, e.g. while one of its loads is pending.
#[derive(Debug, Clone)]
pub struct DisposeHandle {
    disposed: Arc<AtomicBool>,
}

impl DisposeHandle {
    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }
}
