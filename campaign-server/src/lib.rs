//! ViewzKart Campaign Server
//!
//! Prices creator-marketing campaigns: reel count times the configured
//! price, minus the best volume tier, minus an optional coupon, gated on
//! the brand's balance.
//!
//! # Module layout
//!
//! ```text
//! campaign-server/src/
//! ├── core/       # config, state, server, errors
//! ├── pricing/    # pure pricing engine (tiers, coupons, budget, balance gate)
//! ├── services/   # quotes and campaign submission over the stores
//! ├── db/         # SQLite pool, migrations, repositories
//! ├── api/        # HTTP routes and handlers
//! └── utils/      # logging, validation
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod pricing;
pub mod services;
pub mod utils;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// Re-export public types
pub use crate::core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult, ErrorCategory, ErrorCode, ErrorResponse};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env` and start logging.
///
/// Reads logging settings straight from the environment so it can run
/// before [`Config`] is built.
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine
    let _ = dotenv::dotenv();

    let config = Config::from_env();
    init_logger_with_file(
        Some(config.log_level.as_str()),
        config.log_json,
        config.log_dir.as_deref(),
    );
    Ok(())
}

/// Router with middleware and state, ready to serve
pub fn build_app(state: ServerState) -> Router {
    api::build_router()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub fn print_banner() {
    println!(
        r#"
 _    ___                     __ __           __
| |  / (_)__ _      ______   / //_/___ ______/ /_
| | / / / _ \ | /| / /_  /  / ,< / __ `/ ___/ __/
| |/ / /  __/ |/ |/ / / /_ / /| / /_/ / /  / /_
|___/_/\___/|__/|__/ /___//_/ |_\__,_/_/   \__/
    "#
    );
}
