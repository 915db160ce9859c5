//! Pricing API
//!
//! | Path | Method | Meaning |
//! |------|--------|---------|
//! | /api/pricing/quote | POST | Budget breakdown for a reel count and coupon |
//! | /api/pricing/config | GET | Current price and tiers |
//! | /api/pricing/config | PUT | Replace price and tiers |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/pricing", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/quote", post(handler::quote))
        .route("/config", get(handler::get_config).put(handler::replace_config))
}
