use sea_orm::DbErr;
use thiserror::Error;

/// Failure of a submission pipeline step.
///
/// The HTTP layer maps each variant to a status code; nothing below it
/// formats responses.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// Caller input was missing or malformed. No write was attempted.
    #[error("{0}")]
    Validation(String),

    /// The referenced submission or assignment does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The analysis service could not be reached or rejected the upload.
    #[error("Analysis request failed: {message}")]
    Upstream { status: Option<u16>, message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SubmissionError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

impl From<DbErr> for SubmissionError {
    fn from(err: DbErr) -> Self {
        SubmissionError::Internal(format!("Database error: {err}"))
    }
}

impl From<serde_json::Error> for SubmissionError {
    fn from(err: serde_json::Error) -> Self {
        SubmissionError::Internal(format!("Could not encode feedback: {err}"))
    }
}

pub type SubmissionResult<T> = Result<T, SubmissionError>;
