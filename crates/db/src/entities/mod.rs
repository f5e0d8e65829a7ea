//! `SeaORM` entity definitions.

pub mod expenses;
