//! Chart series derived from dashboard aggregates.

use serde::Serialize;

use crate::models::{MovementSummary, TopProduct};

/// Two-bucket bar series: units moved in, then units moved out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovementChart {
    pub labels: [&'static str; 2],
    pub values: [u64; 2],
}

impl MovementChart {
    /// Build the series; a missing summary yields zeros.
    #[must_use]
    pub fn from_summary(summary: Option<&MovementSummary>) -> Self {
        let summary = summary.copied().unwrap_or_default();
        Self {
            labels: ["In", "Out"],
            values: [summary.in_quantity, summary.out_quantity],
        }
    }

    /// The inbound bucket.
    #[must_use]
    pub const fn inbound(&self) -> u64 {
        self.values[0]
    }

    /// The outbound bucket.
    #[must_use]
    pub const fn outbound(&self) -> u64 {
        self.values[1]
    }
}

impl Default for MovementChart {
    fn default() -> Self {
        Self::from_summary(None)
    }
}

/// Ranking series: parallel product names and movement counts.
///
/// Order is exactly what the server returned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RankingChart {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
}

impl RankingChart {
    /// Build the series from the top-products list.
    #[must_use]
    pub fn from_top_products(products: &[TopProduct]) -> Self {
        let (labels, values) = products
            .iter()
            .map(|p| (p.product_name.clone(), p.total_movements))
            .unzip();
        Self { labels, values }
    }

    /// Number of ranked products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the ranking is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterate `(label, value)` pairs.
    pub fn entries(&self) -> impl Iterator<Item = (&str, u64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}
