//! Client-side list filters.
//!
//! The product list is fetched once and narrowed locally by three
//! independent selectors. The filter is recomputed in full on every change;
//! its output is always a subsequence of the input in the original order.

use serde::{Deserialize, Serialize};

use crate::models::{LOW_STOCK_THRESHOLD, Movement, MovementKind, Product};
use crate::types::CategoryId;

/// Error returned when a filter selector string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field} filter: {value}")]
pub struct ParseFilterError {
    field: &'static str,
    value: String,
}

/// Category selector: everything, or one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(CategoryId),
}

impl CategoryFilter {
    /// Whether a product passes this selector.
    ///
    /// Uncategorised products never match a specific category.
    #[must_use]
    pub fn matches(self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Only(id) => product.category_id == Some(id),
        }
    }
}

impl std::str::FromStr for CategoryFilter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<CategoryId>()
            .map(Self::Only)
            .map_err(|_| ParseFilterError {
                field: "category",
                value: s.to_owned(),
            })
    }
}

/// Stock-range selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockFilter {
    #[default]
    All,
    /// Below the low-stock threshold (includes out of stock).
    Low,
    /// Exactly zero.
    Out,
    /// At or above the low-stock threshold.
    Available,
}

impl StockFilter {
    /// Whether a stock count passes this selector.
    #[must_use]
    pub const fn matches(self, stock: u32) -> bool {
        match self {
            Self::All => true,
            Self::Low => stock < LOW_STOCK_THRESHOLD,
            Self::Out => stock == 0,
            Self::Available => stock >= LOW_STOCK_THRESHOLD,
        }
    }
}

impl std::str::FromStr for StockFilter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "low" => Ok(Self::Low),
            "out" => Ok(Self::Out),
            "available" => Ok(Self::Available),
            _ => Err(ParseFilterError {
                field: "stock",
                value: s.to_owned(),
            }),
        }
    }
}

/// The three product-list selectors, combined conjunctively.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    /// Free-text term matched against name or description.
    pub search: String,
    pub category: CategoryFilter,
    pub stock: StockFilter,
}

impl ProductFilter {
    /// Whether every selector is in its match-everything state.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search.is_empty()
            && self.category == CategoryFilter::All
            && self.stock == StockFilter::All
    }

    /// Reset every selector.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether a product passes all three selectors.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_search(product)
            && self.category.matches(product)
            && self.stock.matches(product.stock)
    }

    /// Filter `products`, keeping their order.
    #[must_use]
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let term = self.search.to_lowercase();
        products
            .iter()
            .filter(|p| {
                text_matches(&term, p) && self.category.matches(p) && self.stock.matches(p.stock)
            })
            .cloned()
            .collect()
    }

    fn matches_search(&self, product: &Product) -> bool {
        text_matches(&self.search.to_lowercase(), product)
    }
}

/// Case-insensitive substring test; `term` must already be lowercase.
fn text_matches(term: &str, product: &Product) -> bool {
    term.is_empty()
        || product.name.to_lowercase().contains(term)
        || product.description.to_lowercase().contains(term)
}

/// Movement list selector: everything, or one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MovementFilter {
    #[default]
    All,
    Kind(MovementKind),
}

impl MovementFilter {
    /// Filter `movements`, keeping their order.
    #[must_use]
    pub fn apply(self, movements: &[Movement]) -> Vec<Movement> {
        match self {
            Self::All => movements.to_vec(),
            Self::Kind(kind) => movements
                .iter()
                .filter(|m| m.kind == kind)
                .cloned()
                .collect(),
        }
    }
}

impl std::str::FromStr for MovementFilter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<MovementKind>()
            .map(Self::Kind)
            .map_err(|_| ParseFilterError {
                field: "movement",
                value: s.to_owned(),
            })
    }
}
