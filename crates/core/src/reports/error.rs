//! Report error types.

use cashflow_shared::AppError;
use thiserror::Error;

use crate::expenses::RepositoryError;

/// Errors that can occur during report generation.
///
/// An empty month is not an error; it is reported as `Ok(None)`.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The requested month could not be parsed.
    #[error("Invalid month: {0}")]
    InvalidMonth(String),

    /// Building or serializing the document failed.
    #[error("Rendering failed: {0}")]
    Rendering(String),

    /// The expense repository failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::InvalidMonth(msg) => Self::Validation(msg),
            ReportError::Rendering(msg) => Self::Rendering(msg),
            ReportError::Repository(e) => e.into(),
        }
    }
}
