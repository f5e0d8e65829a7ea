//! Core business logic for CashFlow.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, conversion rules, and report layout live here.
//!
//! # Modules
//!
//! - `expenses` - Expense records and the repository contracts over them
//! - `currency` - Display-currency multipliers and rounding
//! - `reports` - Monthly expense report aggregation, layout, and rendering

pub mod currency;
pub mod expenses;
pub mod reports;
