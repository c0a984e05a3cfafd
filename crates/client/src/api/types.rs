//! Response envelopes of the inventory API.
//!
//! The server wraps every payload in a small object; these types mirror
//! those wrappers so the resource methods can unwrap them.

use inventory_panel_core::models::{
    Category, DashboardStats, Movement, MovementSummary, Product, TopProduct, User,
};
use serde::Deserialize;

/// Body of every error response.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// `{message}` acknowledgement.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// `{user}` from the profile endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct ProfileResponse {
    pub user: User,
}

/// `{products, total}` from product listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductList {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductResponse {
    pub product: Product,
}

/// `{message, product}` from create and update.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductSaved {
    #[serde(default)]
    pub message: String,
    pub product: Product,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CategoryList {
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CategoryResponse {
    pub category: Category,
}

/// `{message, category}` from create and update.
#[derive(Debug, Clone, Deserialize)]
pub struct CategorySaved {
    #[serde(default)]
    pub message: String,
    pub category: Category,
}

/// `{movements, total}` from movement listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovementList {
    #[serde(default)]
    pub movements: Vec<Movement>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MovementResponse {
    pub movement: Movement,
}

/// `{message, movement, nuevo_stock}` from movement creation.
#[derive(Debug, Clone, Deserialize)]
pub struct MovementCreated {
    #[serde(default)]
    pub message: String,
    pub movement: Movement,
    /// Product stock after the movement was applied.
    #[serde(rename = "nuevo_stock")]
    pub new_stock: u32,
}

/// `{message, warning}` from movement deletion.
///
/// Deleting a movement does not revert the stock change it caused; the
/// server says so in `warning`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovementDeleted {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub warning: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatsResponse {
    pub stats: DashboardStats,
}

/// `{products, total, message}` from the low-stock alert feed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LowStockAlerts {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub message: Option<String>,
}

/// `{summary, period}` from the movement summary.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryResponse {
    #[serde(default)]
    pub summary: MovementSummary,
    #[serde(default)]
    pub period: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TopProductList {
    #[serde(default)]
    pub products: Vec<TopProduct>,
}
