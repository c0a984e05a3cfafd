//! Dashboard screen.

use inventory_panel_core::charts::{MovementChart, RankingChart};
use tracing::{error, instrument};

use super::{DisposeHandle, Effects, Lifecycle};
use crate::api::{ApiClient, DashboardSnapshot};
use crate::notice::Notice;
use crate::session::SessionContext;

/// Load state of the dashboard.
#[derive(Debug, Clone, Default)]
pub enum DashboardState {
    #[default]
    Loading,
    Ready(Box<DashboardSnapshot>),
    /// The last load failed; nothing from it is shown.
    Failed,
}

/// Aggregated inventory overview.
#[derive(Debug)]
pub struct DashboardView {
    api: ApiClient,
    session: SessionContext,
    lifecycle: Lifecycle,
    state: DashboardState,
}

impl DashboardView {
    #[must_use]
    pub fn new(api: ApiClient, session: SessionContext) -> Self {
        Self {
            api,
            session,
            lifecycle: Lifecycle::default(),
            state: DashboardState::Loading,
        }
    }

    #[instrument(skip(self))]
    pub async fn init(&mut self) -> Effects {
        self.reload().await
    }

    /// Issue the five dashboard reads at once.
    ///
    /// The view becomes ready only if all five succeed. Any failure is
    /// reported once and drops whatever was shown before.
    pub async fn reload(&mut self) -> Effects {
        self.state = DashboardState::Loading;
        let result = self.api.load_dashboard(&self.session).await;
        if self.lifecycle.is_disposed() {
            return Effects::none();
        }

        match result {
            Ok(snapshot) => {
                self.state = DashboardState::Ready(Box::new(snapshot));
                Effects::none()
            }
            Err(e) => {
                error!(error = %e, "Failed to load dashboard");
                self.state = DashboardState::Failed;
                Effects::notice(Notice::from_api_error(&e, "Error loading dashboard"))
            }
        }
    }

    #[must_use]
    pub const fn state(&self) -> &DashboardState {
        &self.state
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.state, DashboardState::Loading)
    }

    /// Loaded data, if the last load succeeded.
    #[must_use]
    pub fn snapshot(&self) -> Option<&DashboardSnapshot> {
        match &self.state {
            DashboardState::Ready(snapshot) => Some(snapshot.as_ref()),
            DashboardState::Loading | DashboardState::Failed => None,
        }
    }

    /// Inbound/outbound series; zeros until loaded.
    #[must_use]
    pub fn movement_chart(&self) -> MovementChart {
        self.snapshot()
            .map_or_else(MovementChart::default, DashboardSnapshot::movement_chart)
    }

    /// Top-products series; empty until loaded.
    #[must_use]
    pub fn ranking_chart(&self) -> RankingChart {
        self.snapshot()
            .map_or_else(RankingChart::default, DashboardSnapshot::ranking_chart)
    }

    #[must_use]
    pub fn dispose_handle(&self) -> DisposeHandle {
        self.lifecycle.handle()
    }

    pub fn dispose(&self) {
        self.lifecycle.dispose();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use inventory_panel_core::types::Role;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::views::testing::{movement_json, product_json, session, setup};

    async fn mount(server: &MockServer, route: &str, status: u16, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(format!("/api/dashboard/{route}")))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(server)
            .await;
    }

    async fn mount_all_but(server: &MockServer, skip: &str) {
        let endpoints = [
            ("stats", json!({"stats": {"total_products": 4, "total_inventory_value": 250.0}})),
            (
                "movement-summary",
                json!({
                    "summary": {"total_entradas": 2, "total_salidas": 1, "cantidad_entradas": 30, "cantidad_salidas": 8},
                    "period": "últimos 30 días"
                }),
            ),
            (
                "recent-movements",
                json!({"movements": [movement_json(1, 1, "entrada", 30)], "total": 1}),
            ),
            (
                "low-stock-alerts",
                json!({"products": [product_json(2, "Lija", None, 3)], "total": 1}),
            ),
            (
                "top-products",
                json!({"products": [
                    {"product_id": 1, "product_name": "Brocha", "total_movements": 6},
                    {"product_id": 2, "product_name": "Lija", "total_movements": 2}
                ], "total": 2}),
            ),
        ];
        for (route, body) in endpoints {
            if route != skip {
                mount(server, route, 200, body).await;
            }
        }
    }

    #[tokio::test]
    async fn test_ready_when_all_five_succeed() {
        let (server, api) = setup().await;
        mount_all_but(&server, "").await;

        let mut view = DashboardView::new(api, session(Role::Employee));
        assert!(view.is_loading());
        assert!(view.init().await.is_empty());

        let snapshot = view.snapshot().unwrap();
        assert_eq!(snapshot.stats.total_products, 4);
        assert_eq!(snapshot.low_stock.len(), 1);
        assert_eq!(view.movement_chart().values, [30, 8]);
        assert_eq!(view.ranking_chart().labels, vec!["Brocha", "Lija"]);
        assert_eq!(view.ranking_chart().values, vec![6, 2]);
    }

    #[tokio::test]
    async fn test_single_failure_exposes_nothing() {
        let (server, api) = setup().await;
        mount_all_but(&server, "top-products").await;
        mount(&server, "top-products", 500, json!({"error": "boom"})).await;

        let mut view = DashboardView::new(api, session(Role::Employee));
        let effects = view.init().await;

        assert!(matches!(view.state(), DashboardState::Failed));
        assert!(view.snapshot().is_none());
        assert!(!view.is_loading());
        assert_eq!(effects.notice.unwrap().text, "boom");
        assert_eq!(view.movement_chart().values, [0, 0]);
        assert!(view.ranking_chart().is_empty());
    }
}
