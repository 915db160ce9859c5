//! Campaign API
//!
//! | Path | Method | Meaning |
//! |------|--------|---------|
//! | /api/campaigns/{id} | GET | One campaign with its pricing breakdown |
//! | /api/campaigns/{id}/status | PUT | Lifecycle transition |

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/campaigns", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/status", put(handler::update_status))
}
