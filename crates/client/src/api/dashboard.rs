//! Dashboard aggregate endpoints.

use inventory_panel_core::charts::{MovementChart, RankingChart};
use inventory_panel_core::models::{DashboardStats, Movement, Product, TopProduct};
use tracing::{debug, instrument};

use super::{ApiClient, LowStockAlerts, MovementList, StatsResponse, SummaryResponse, TopProductList};
use crate::error::ApiError;
use crate::session::SessionContext;

/// Everything the dashboard shows, loaded in one go.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub stats: DashboardStats,
    pub summary: SummaryResponse,
    pub recent_movements: Vec<Movement>,
    pub low_stock: Vec<Product>,
    pub top_products: Vec<TopProduct>,
}

impl DashboardSnapshot {
    /// Units in and out over the summary period.
    #[must_use]
    pub fn movement_chart(&self) -> MovementChart {
        MovementChart::from_summary(Some(&self.summary.summary))
    }

    /// Most-moved products, in server order.
    #[must_use]
    pub fn ranking_chart(&self) -> RankingChart {
        RankingChart::from_top_products(&self.top_products)
    }
}

impl ApiClient {
    /// Inventory-wide counters.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, session))]
    pub async fn dashboard_stats(&self, session: &SessionContext) -> Result<DashboardStats, ApiError> {
        let response: StatsResponse = self.get(session, "/dashboard/stats").await?;
        Ok(response.stats)
    }

    /// Most recent movements.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, session))]
    pub async fn recent_movements(
        &self,
        session: &SessionContext,
    ) -> Result<Vec<Movement>, ApiError> {
        let list: MovementList = self.get(session, "/dashboard/recent-movements").await?;
        Ok(list.movements)
    }

    /// Products below the alert threshold.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, session))]
    pub async fn low_stock_alerts(
        &self,
        session: &SessionContext,
    ) -> Result<LowStockAlerts, ApiError> {
        self.get(session, "/dashboard/low-stock-alerts").await
    }

    /// Movement totals over the last period.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, session))]
    pub async fn movement_summary(
        &self,
        session: &SessionContext,
    ) -> Result<SummaryResponse, ApiError> {
        self.get(session, "/dashboard/movement-summary").await
    }

    /// Products ranked by number of movements.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, session))]
    pub async fn top_products(&self, session: &SessionContext) -> Result<Vec<TopProduct>, ApiError> {
        let list: TopProductList = self.get(session, "/dashboard/top-products").await?;
        Ok(list.products)
    }

    /// Issue all five dashboard reads concurrently.
    ///
    /// Succeeds only if every read succeeds; the first failure is returned
    /// and nothing else is exposed.
    ///
    /// # Errors
    ///
    /// Returns the first error among the five requests.
    #[instrument(skip(self, session))]
    pub async fn load_dashboard(&self, session: &SessionContext) -> Result<DashboardSnapshot, ApiError> {
        let (stats, summary, recent_movements, alerts, top_products) = tokio::try_join!(
            self.dashboard_stats(session),
            self.movement_summary(session),
            self.recent_movements(session),
            self.low_stock_alerts(session),
            self.top_products(session),
        )?;

        debug!(
            recent = recent_movements.len(),
            low_stock = alerts.products.len(),
            top = top_products.len(),
            "Dashboard loaded"
        );

        Ok(DashboardSnapshot {
            stats,
            summary,
            recent_movements,
            low_stock: alerts.products,
            top_products,
        })
    }
}
