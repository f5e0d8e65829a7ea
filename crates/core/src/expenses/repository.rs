//! Repository contracts for expense records.
//!
//! Reads and writes are split so report generation only ever depends on the
//! read side.

use async_trait::async_trait;

use super::error::RepositoryError;
use super::types::{Expense, NewExpense};
use crate::reports::ReportMonth;

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Read access to stored expenses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExpensesReadOnlyRepository: Send + Sync {
    /// Returns every stored expense.
    async fn get_all(&self) -> RepositoryResult<Vec<Expense>>;

    /// Finds an expense by ID.
    async fn get_by_id(&self, id: i64) -> RepositoryResult<Option<Expense>>;

    /// Finds the first expense with exactly this title.
    async fn get_by_title(&self, title: &str) -> RepositoryResult<Option<Expense>>;

    /// Returns the expenses dated within `month`, in a stable order.
    ///
    /// The range covers the whole month: `[first instant, first instant of next month)`.
    async fn filter_by_month(&self, month: ReportMonth) -> RepositoryResult<Vec<Expense>>;
}

/// Write access to stored expenses.
#[async_trait]
pub trait ExpensesWriteOnlyRepository: Send + Sync {
    /// Stores a new expense and returns it with its assigned ID.
    async fn add(&self, expense: NewExpense) -> RepositoryResult<Expense>;

    /// Deletes an expense. Returns `true` if a row was removed.
    async fn delete(&self, id: i64) -> RepositoryResult<bool>;
}
