//! Repository implementations for data access.
//!
//! Repositories implement the contracts defined in `cashflow-core`,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod expense;

pub use expense::ExpenseRepository;
