//! Records mirrored from the inventory API.
//!
//! Entities carry no client-owned identity or lifecycle: every reload
//! replaces the in-memory copies wholesale. Request payloads are the bodies
//! the write endpoints accept.

pub mod category;
pub mod dashboard;
pub mod movement;
pub mod product;
pub mod user;

pub use category::{Category, CategoryRequest};
pub use dashboard::{DashboardStats, MovementSummary, TopProduct};
pub use movement::{Movement, MovementKind, MovementRequest, ParseMovementKindError};
pub use product::{LOW_STOCK_THRESHOLD, Product, ProductRequest, StockLevel};
pub use user::{AuthResponse, LoginRequest, RegisterRequest, User};
