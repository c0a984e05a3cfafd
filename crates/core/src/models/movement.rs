//! Stock movements: recorded inflows and outflows against a product.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::product::Product;
use super::user::User;
use crate::types::{MovementId, ProductId, UserId};

/// Error returned when a movement kind string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid movement kind: {0} (expected in or out)")]
pub struct ParseMovementKindError(pub String);

/// Direction of a stock movement.
///
/// The API names these `entrada` and `salida`; the client calls them
/// `in` and `out` everywhere except on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MovementKind {
    #[default]
    #[serde(rename = "entrada")]
    In,
    #[serde(rename = "salida")]
    Out,
}

impl MovementKind {
    /// Both kinds, inflow first.
    pub const ALL: [Self; 2] = [Self::In, Self::Out];

    /// Name used in API paths and payloads.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::In => "entrada",
            Self::Out => "salida",
        }
    }

    /// Client-facing name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
        }
    }
}

impl std::fmt::Display for MovementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MovementKind {
    type Err = ParseMovementKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "in" | "entrada" => Ok(Self::In),
            "out" | "salida" => Ok(Self::Out),
            _ => Err(ParseMovementKindError(s.to_owned())),
        }
    }
}

/// A movement as returned by the inventory API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub id: MovementId,
    pub product_id: ProductId,
    /// Embedded product, present when the server preloads it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
    pub user_id: UserId,
    /// Embedded user, present when the server preloads it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(rename = "type")]
    pub kind: MovementKind,
    pub quantity: u32,
    #[serde(default)]
    pub description: Option<String>,
    pub movement_date: DateTime<Utc>,
}

impl Movement {
    /// Product name if embedded, otherwise the product id.
    #[must_use]
    pub fn product_label(&self) -> String {
        self.product
            .as_ref()
            .filter(|p| !p.name.is_empty())
            .map_or_else(|| format!("#{}", self.product_id), |p| p.name.clone())
    }

    /// Username if embedded, otherwise the user id.
    #[must_use]
    pub fn user_label(&self) -> String {
        self.user
            .as_ref()
            .filter(|u| !u.username.is_empty())
            .map_or_else(|| format!("#{}", self.user_id), |u| u.username.clone())
    }
}

/// Body for `POST /movements`.
///
/// The server attributes the movement to the authenticated user and stamps
/// the date itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementRequest {
    pub product_id: ProductId,
    #[serde(rename = "type")]
    pub kind: MovementKind,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
