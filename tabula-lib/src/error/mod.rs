//! Error types

mod field;
mod filter;
mod query;

pub use field::*;
pub use filter::*;
pub use query::*;

/// Top-level error for operations that cross several components.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request could not be turned into a valid query.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// A record field could not be read.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// A filter could not be evaluated.
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// A response body could not be serialized.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
