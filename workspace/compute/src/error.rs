use thiserror::Error;

/// Error types for the compute module
#[derive(Error, Debug)]
pub enum ComputeError {
    /// The caller's household does not own the requested resource
    #[error("Not authorized to access this resource")]
    NotAuthorized,

    /// A required record does not exist (household, credit card, ...)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Error from the database operations
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
