//! Expense error types.

use cashflow_shared::AppError;
use thiserror::Error;

/// Errors raised while handling expense records.
#[derive(Debug, Error)]
pub enum ExpenseError {
    /// Expense not found.
    #[error("Expense not found: {0}")]
    NotFound(i64),

    /// Input failed validation.
    #[error("Invalid expense: {0}")]
    Validation(String),

    /// The backing store failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Failure reported by a repository implementation.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The underlying database returned an error.
    #[error("Database error: {0}")]
    Database(String),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Database(msg) => Self::Database(msg),
        }
    }
}

impl From<ExpenseError> for AppError {
    fn from(err: ExpenseError) -> Self {
        match err {
            ExpenseError::NotFound(id) => Self::NotFound(format!("expense {id}")),
            ExpenseError::Validation(msg) => Self::Validation(msg),
            ExpenseError::Repository(e) => e.into(),
        }
    }
}
