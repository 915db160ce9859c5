use shared::error::AppError;
use thiserror::Error;

/// Startup and serve failures
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Storage unavailable: {0}")]
    Storage(#[from] AppError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
