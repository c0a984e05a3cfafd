//! Aggregates served by the dashboard endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// Inventory-wide counters from `GET /dashboard/stats`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardStats {
    pub total_products: u64,
    pub total_categories: u64,
    pub total_stock: u64,
    pub low_stock_products: u64,
    pub total_users: u64,
    /// Sum of stock × price across all products.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_inventory_value: Decimal,
}

/// Last-30-days movement totals from `GET /dashboard/movement-summary`.
///
/// Every counter defaults to zero when the server leaves it out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementSummary {
    /// Number of inbound movements.
    #[serde(rename = "total_entradas")]
    pub in_movements: u64,
    /// Number of outbound movements.
    #[serde(rename = "total_salidas")]
    pub out_movements: u64,
    /// Units received.
    #[serde(rename = "cantidad_entradas")]
    pub in_quantity: u64,
    /// Units shipped.
    #[serde(rename = "cantidad_salidas")]
    pub out_quantity: u64,
}

/// One entry of `GET /dashboard/top-products`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopProduct {
    pub product_id: ProductId,
    pub product_name: String,
    #[serde(default)]
    pub total_movements: u64,
    #[serde(default)]
    pub current_stock: u32,
    #[serde(default)]
    pub category_name: String,
}
