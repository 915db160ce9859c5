//! Data models
//!
//! Shared between the campaign server and the dashboard (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod account;
pub mod campaign;
pub mod coupon;
pub mod limits;
pub mod pricing;
pub mod pricing_config;
pub mod serde_helpers;

// Re-exports
pub use account::*;
pub use campaign::*;
pub use coupon::*;
pub use limits::*;
pub use pricing::*;
pub use pricing_config::*;
