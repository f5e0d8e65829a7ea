//! Document rendering.
//!
//! [`ReportRenderer`] lays a model out and hands the layout to a
//! [`DocumentBackend`], which produces the finished file.

mod pdf;
mod xlsx;

use std::sync::Arc;

pub use pdf::PdfBackend;
pub use xlsx::XlsxBackend;

use super::error::ReportError;
use super::layout::{self, DocumentLayout};
use super::style::StyleConfig;
use super::types::{ReportFormat, ReportModel};

/// Turns a layout into document bytes.
///
/// Implementations must be deterministic for a given layout and must never
/// return partial output.
#[cfg_attr(test, mockall::automock)]
pub trait DocumentBackend: Send + Sync {
    /// Format produced by this backend.
    fn format(&self) -> ReportFormat;

    /// Renders the layout into a complete document.
    fn render(&self, layout: &DocumentLayout) -> Result<Vec<u8>, ReportError>;
}

/// Renders report models with a fixed style.
#[derive(Debug, Clone)]
pub struct ReportRenderer {
    style: Arc<StyleConfig>,
}

impl ReportRenderer {
    /// Creates a renderer sharing `style`.
    #[must_use]
    pub const fn new(style: Arc<StyleConfig>) -> Self {
        Self { style }
    }

    /// The style applied to every report.
    #[must_use]
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Lays out a model without rendering it.
    #[must_use]
    pub fn layout(&self, model: &ReportModel) -> DocumentLayout {
        layout::build(model, &self.style)
    }

    /// Lays out and renders a model with `backend`.
    pub fn render(
        &self,
        model: &ReportModel,
        backend: &dyn DocumentBackend,
    ) -> Result<Vec<u8>, ReportError> {
        let layout = self.layout(model);
        let bytes = backend.render(&layout)?;

        tracing::debug!(
            format = %backend.format(),
            lines = model.lines.len(),
            bytes = bytes.len(),
            "Report rendered"
        );

        Ok(bytes)
    }

    /// Returns the backend for a format, configured with this renderer's fonts.
    #[must_use]
    pub fn backend(&self, format: ReportFormat) -> Box<dyn DocumentBackend> {
        match format {
            ReportFormat::Pdf => Box::new(PdfBackend::new()),
            ReportFormat::Excel => Box::new(XlsxBackend::new(self.style.fonts.clone())),
        }
    }
}
