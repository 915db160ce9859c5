//! Coupon API
//!
//! | Path | Method | Meaning |
//! |------|--------|---------|
//! | /api/coupons | GET | All coupons |
//! | /api/coupons | POST | Create a coupon |
//! | /api/coupons/validate | POST | Check a code without redeeming it |
//! | /api/coupons/{code} | GET | One coupon |
//! | /api/coupons/{code} | PUT | Partial update |
//! | /api/coupons/{code} | DELETE | Deactivate |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/coupons", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/validate", post(handler::validate))
        .route(
            "/{code}",
            get(handler::get_by_code)
                .put(handler::update)
                .delete(handler::delete),
        )
}
