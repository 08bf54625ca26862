//! Common error types for the recipe core.

use thiserror::Error;

/// Common result type for recipe core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure modes of the recipe core. Nothing here is fatal to the
/// process; callers report and carry on.
#[derive(Error, Debug)]
pub enum Error {
    /// Storage query error (wraps diesel::result::Error)
    #[error("Storage error: {0}")]
    Storage(#[from] diesel::result::Error),

    /// Storage connection error (wraps the pool error)
    #[error("Storage connection error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Photo copy or other file-system error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
