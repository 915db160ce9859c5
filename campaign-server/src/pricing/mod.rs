//! Campaign Pricing Engine
//!
//! Pure functions that turn a reel count, the current pricing
//! configuration and an optional coupon into a budget, plus the balance
//! gate applied before a campaign is accepted.
//!
//! Nothing here touches shared state. Callers fetch fresh inputs from the
//! stores and re-invoke the engine whenever any of them changes.

mod budget;
mod coupon;
mod error;
pub mod money;
mod tier;

pub use budget::*;
pub use coupon::*;
pub use error::*;
pub use tier::*;
