// Error types for the courtage data layer.
// Covers portal API errors, store failures, and serialization errors.

use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum CourtageError {
    #[error("portal API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("authentication failed: invalid or expired token")]
    Unauthorized,

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("missing COURTAGE_API_TOKEN environment variable")]
    MissingToken,

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, CourtageError>;
