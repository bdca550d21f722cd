use thiserror::Error;

#[derive(Error, Debug)]
pub enum AcademyError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Persistence error: {0}")]
    Persistence(#[from] eyre::Report),

    /// A multi-step operation failed after one step had already committed.
    /// The message records which step completed and which failed.
    #[error("Partial failure: {0}")]
    PartialFailure(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type AcademyResult<T> = Result<T, AcademyError>;
