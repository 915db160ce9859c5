//! Account API
//!
//! | Path | Method | Meaning |
//! |------|--------|---------|
//! | /api/accounts | POST | Create an account |
//! | /api/accounts/{id} | GET | One account |
//! | /api/accounts/{id}/balance | GET | Spendable balance |
//! | /api/accounts/{id}/deposit | POST | Add funds |
//! | /api/accounts/{id}/campaigns | GET | Campaigns of the account |
//! | /api/accounts/{id}/campaigns | POST | Submit (price and charge) a campaign |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/accounts", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/balance", get(handler::balance))
        .route("/{id}/deposit", post(handler::deposit))
        .route(
            "/{id}/campaigns",
            get(handler::list_campaigns).post(handler::submit_campaign),
        )
}
