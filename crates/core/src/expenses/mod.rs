//! Expense records and the repository contracts over them.

pub mod error;
pub mod repository;
pub mod types;

pub use error::{ExpenseError, RepositoryError};
pub use repository::{ExpensesReadOnlyRepository, ExpensesWriteOnlyRepository, RepositoryResult};
pub use types::*;

#[cfg(test)]
pub use repository::MockExpensesReadOnlyRepository;
