//! HTTP API
//!
//! - [`health`] - liveness
//! - [`pricing`] - quotes and pricing configuration
//! - [`coupons`] - coupon administration and validation
//! - [`accounts`] - accounts, balance, campaign submission
//! - [`campaigns`] - campaign lookup and lifecycle
//! - [`events`] - change notifications (server-sent events)

pub mod accounts;
pub mod campaigns;
pub mod coupons;
pub mod events;
pub mod health;
pub mod pricing;

use axum::Router;

use crate::core::ServerState;

/// All routes, without middleware or state
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(pricing::router())
        .merge(coupons::router())
        .merge(accounts::router())
        .merge(campaigns::router())
        .merge(events::router())
}
