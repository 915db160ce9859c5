//! Shared types for the ViewzKart campaign service
//!
//! Common types used by the server and its API clients: error codes,
//! error bodies, record models and the sync notification payload.

pub mod error;
pub mod message;
pub mod models;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCategory, ErrorCode, ErrorResponse};
pub use message::SyncPayload;
