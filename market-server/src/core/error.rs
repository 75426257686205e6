use thiserror::Error;

/// Top-level server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Result type for server startup and shutdown
pub type Result<T> = std::result::Result<T, ServerError>;
