//! Application services
//!
//! - [`quote`] - budget estimates from fresh store reads
//! - [`campaign`] - campaign submission and lifecycle

pub mod campaign;
pub mod quote;

pub use campaign::CampaignService;
pub use quote::{check_balance, quote_budget};
