//! Core: configuration, shared state, HTTP server and startup errors
//!
//! - [`Config`] - environment-driven configuration
//! - [`ServerState`] - shared handles passed to every handler
//! - [`Server`] - HTTP server with graceful shutdown
//! - [`ServerError`] - startup and serve failures

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::Config;
pub use error::{Result, ServerError};
pub use server::Server;
pub use state::{ResourceVersions, ServerState};
