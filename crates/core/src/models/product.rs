//! Product records and stock classification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::Category;
use crate::types::{CategoryId, Price, ProductId};

/// Stock below this many units counts as low.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Stock below this many units is critical (but not yet out).
const CRITICAL_STOCK_THRESHOLD: u32 = 5;

/// A product as returned by the inventory API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    /// Embedded category, present when the server preloads it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub price: Price,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Classify the current stock.
    #[must_use]
    pub const fn stock_level(&self) -> StockLevel {
        StockLevel::from_stock(self.stock)
    }

    /// Name of the embedded category, if the server included one.
    #[must_use]
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.name.as_str())
    }

    /// Image URL, treating an empty string as absent.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image_url.as_deref().filter(|url| !url.is_empty())
    }
}

/// Body for `POST /products` and `PUT /products/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    pub price: Price,
    pub stock: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Display classification of a stock count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockLevel {
    /// No units left.
    Out,
    /// Fewer than five units.
    Critical,
    /// Fewer than ten units.
    Low,
    /// Ten or more units.
    Good,
}

impl StockLevel {
    /// Classify a stock count.
    #[must_use]
    pub const fn from_stock(stock: u32) -> Self {
        if stock == 0 {
            Self::Out
        } else if stock < CRITICAL_STOCK_THRESHOLD {
            Self::Critical
        } else if stock < LOW_STOCK_THRESHOLD {
            Self::Low
        } else {
            Self::Good
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Out => "Out of stock",
            Self::Critical => "Critical",
            Self::Low => "Low",
            Self::Good => "Available",
        }
    }
}

impl std::fmt::Display for StockLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_level_boundaries() {
        assert_eq!(StockLevel::from_stock(0), StockLevel::Out);
        assert_eq!(StockLevel::from_stock(1), StockLevel::Critical);
        assert_eq!(StockLevel::from_stock(4), StockLevel::Critical);
        assert_eq!(StockLevel::from_stock(5), StockLevel::Low);
        assert_eq!(StockLevel::from_stock(9), StockLevel::Low);
        assert_eq!(StockLevel::from_stock(10), StockLevel::Good);
    }

    #[test]
    fn test_decodes_server_payload() {
        let json = serde_json::json!({
            "id": 3,
            "name": "Cable HDMI",
            "description": "2 metros",
            "category_id": null,
            "price": 12.5,
            "stock": 4,
            "image_url": "",
            "created_at": "2025-03-01T10:15:00-06:00",
            "updated_at": "2025-03-02T08:00:00Z"
        });

        let product: Product = serde_json::from_value(json).unwrap();
        assert_eq!(product.id, ProductId::new(3));
        assert_eq!(product.category_id, None);
        assert_eq!(product.price, Price::from_cents(1250));
        assert_eq!(product.image(), None);
        assert_eq!(product.stock_level(), StockLevel::Critical);
        assert!(product.created_at.is_some());
    }

    #[test]
    fn test_request_omits_absent_optionals() {
        let request = ProductRequest {
            name: "Mouse".to_owned(),
            description: "Wireless".to_owned(),
            category_id: None,
            price: Price::from_cents(1999),
            stock: 3,
            image_url: None,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("category_id").is_none());
        assert!(value.get("image_url").is_none());
        assert!(value["price"].is_number());
    }
}
