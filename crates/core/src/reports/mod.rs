//! Monthly expense reports.
//!
//! The pipeline is:
//! - fetch the month's expenses through [`crate::expenses::ExpensesReadOnlyRepository`]
//! - aggregate them into a [`ReportModel`] (converted amounts and totals)
//! - lay the model out as immutable [`layout::DocumentLayout`] directives
//! - hand the layout to a [`render::DocumentBackend`] (PDF or XLSX) for bytes

pub mod aggregator;
pub mod error;
pub mod layout;
pub mod render;
pub mod service;
pub mod style;
pub mod types;


pub use aggregator::ReportAggregator;
pub use error::ReportError;
pub use render::{DocumentBackend, PdfBackend, ReportRenderer, XlsxBackend};
pub use service::{ReportService, ReportSettings};
pub use style::StyleConfig;
pub use types::*;
