//! Report generation service.

use std::sync::Arc;

use cashflow_shared::{ReportConfig, RoundingMode};

use super::aggregator::ReportAggregator;
use super::error::ReportError;
use super::render::{DocumentBackend, ReportRenderer};
use super::style::StyleConfig;
use super::types::{ReportFormat, ReportMonth};
use crate::expenses::ExpensesReadOnlyRepository;

/// Settings shared by every report request.
#[derive(Debug, Clone)]
pub struct ReportSettings {
    /// Display currency symbol.
    pub currency_symbol: String,
    /// Rounding applied to converted amounts.
    pub rounding: RoundingMode,
    /// Presentation settings.
    pub style: Arc<StyleConfig>,
}

impl ReportSettings {
    /// Builds settings from report configuration.
    #[must_use]
    pub fn from_config(config: &ReportConfig) -> Self {
        Self {
            currency_symbol: config.currency_symbol.clone(),
            rounding: config.rounding,
            style: Arc::new(StyleConfig::from_config(config)),
        }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self::from_config(&ReportConfig::default())
    }
}

/// Generates monthly expense reports.
pub struct ReportService<R: ExpensesReadOnlyRepository> {
    repo: Arc<R>,
    settings: Arc<ReportSettings>,
    renderer: ReportRenderer,
}

impl<R: ExpensesReadOnlyRepository> ReportService<R> {
    /// Create a new report service.
    #[must_use]
    pub fn new(repo: Arc<R>, settings: Arc<ReportSettings>) -> Self {
        let renderer = ReportRenderer::new(Arc::clone(&settings.style));
        Self {
            repo,
            settings,
            renderer,
        }
    }

    /// Generates the report for `month` in `format`.
    ///
    /// Returns `Ok(None)` when the month has no expenses.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository or the rendering backend fails.
    pub async fn generate(
        &self,
        month: ReportMonth,
        format: ReportFormat,
    ) -> Result<Option<Vec<u8>>, ReportError> {
        let backend = self.renderer.backend(format);
        self.generate_with(month, backend.as_ref()).await
    }

    /// Generates the report for `month` with an explicit backend.
    ///
    /// The backend is not called when the month has no expenses.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository or the rendering backend fails.
    pub async fn generate_with(
        &self,
        month: ReportMonth,
        backend: &dyn DocumentBackend,
    ) -> Result<Option<Vec<u8>>, ReportError> {
        let expenses = self.repo.filter_by_month(month).await?;

        let Some(model) = ReportAggregator::aggregate(
            &expenses,
            month,
            &self.settings.currency_symbol,
            self.settings.rounding,
            &self.settings.style.labels,
        ) else {
            tracing::debug!(%month, "No expenses for month, skipping report");
            return Ok(None);
        };

        let bytes = self
            .renderer
            .render(&model, backend)
            .inspect_err(|e| {
                tracing::error!(error = %e, %month, format = %backend.format(), "Report rendering failed");
            })?;

        tracing::info!(
            %month,
            format = %backend.format(),
            expenses = model.lines.len(),
            total = %model.total,
            "Report generated"
        );

        Ok(Some(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expenses::{Expense, MockExpensesReadOnlyRepository, PaymentType, RepositoryError};
    use crate::reports::layout::{Block, DocumentLayout, Run};
    use crate::reports::render::MockDocumentBackend;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn march() -> ReportMonth {
        ReportMonth::new(2024, 3).unwrap()
    }

    fn expense(id: i64, day: u32) -> Expense {
        Expense {
            id,
            title: format!("Expense {id}"),
            description: None,
            date: NaiveDate::from_ymd_opt(2024, 3, day)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            amount: dec!(10.00),
            payment_type: PaymentType::Cash,
        }
    }

    fn service(repo: MockExpensesReadOnlyRepository) -> ReportService<MockExpensesReadOnlyRepository> {
        let settings = ReportSettings {
            currency_symbol: "R$".to_string(),
            ..ReportSettings::default()
        };
        ReportService::new(Arc::new(repo), Arc::new(settings))
    }

    #[tokio::test]
    async fn test_empty_month_never_renders() {
        let mut repo = MockExpensesReadOnlyRepository::new();
        repo.expect_filter_by_month()
            .withf(|month| *month == march())
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let mut backend = MockDocumentBackend::new();
        backend.expect_render().never();
        backend.expect_format().return_const(ReportFormat::Pdf);

        let result = service(repo).generate_with(march(), &backend).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_returns_backend_bytes() {
        let mut repo = MockExpensesReadOnlyRepository::new();
        repo.expect_filter_by_month()
            .returning(|_| Ok(vec![expense(1, 2), expense(2, 3)]));

        let mut backend = MockDocumentBackend::new();
        backend
            .expect_render()
            .times(1)
            .returning(|_| Ok(b"report".to_vec()));
        backend.expect_format().return_const(ReportFormat::Excel);

        let result = service(repo).generate_with(march(), &backend).await.unwrap();
        assert_eq!(result.as_deref(), Some(&b"report"[..]));
    }

    #[tokio::test]
    async fn test_layout_keeps_repository_order() {
        let mut repo = MockExpensesReadOnlyRepository::new();
        repo.expect_filter_by_month()
            .returning(|_| Ok(vec![expense(7, 20), expense(3, 5), expense(5, 12)]));

        let mut backend = MockDocumentBackend::new();
        backend
            .expect_render()
            .withf(|layout: &DocumentLayout| {
                let titles: Vec<&str> = layout
                    .expense_tables()
                    .iter()
                    .map(|t| t.rows[0].cells[0].text.as_str())
                    .collect();
                titles == ["Expense 7", "Expense 3", "Expense 5"]
            })
            .times(1)
            .returning(|_| Ok(Vec::new()));
        backend.expect_format().return_const(ReportFormat::Pdf);

        service(repo).generate_with(march(), &backend).await.unwrap();
    }

    #[tokio::test]
    async fn test_uses_configured_currency() {
        let mut repo = MockExpensesReadOnlyRepository::new();
        repo.expect_filter_by_month()
            .returning(|_| Ok(vec![expense(1, 2)]));

        let mut backend = MockDocumentBackend::new();
        backend
            .expect_render()
            .withf(|layout: &DocumentLayout| match &layout.blocks[1] {
                Block::Paragraph(p) => p
                    .runs
                    .iter()
                    .any(|run| matches!(run, Run::Text { text, .. } if text == "R$ 54.60")),
                Block::Table(_) => false,
            })
            .times(1)
            .returning(|_| Ok(Vec::new()));
        backend.expect_format().return_const(ReportFormat::Pdf);

        service(repo).generate_with(march(), &backend).await.unwrap();
    }

    #[tokio::test]
    async fn test_repository_error_propagates() {
        let mut repo = MockExpensesReadOnlyRepository::new();
        repo.expect_filter_by_month()
            .returning(|_| Err(RepositoryError::Database("connection reset".to_string())));

        let mut backend = MockDocumentBackend::new();
        backend.expect_render().never();

        let result = service(repo).generate_with(march(), &backend).await;
        assert!(matches!(
            result,
            Err(ReportError::Repository(RepositoryError::Database(msg))) if msg == "connection reset"
        ));
    }

    #[tokio::test]
    async fn test_generate_pdf_is_reproducible() {
        let mut repo = MockExpensesReadOnlyRepository::new();
        repo.expect_filter_by_month()
            .times(2)
            .returning(|_| Ok(vec![expense(1, 2), expense(2, 9)]));

        let service = service(repo);
        let first = service.generate(march(), ReportFormat::Pdf).await.unwrap();
        let second = service.generate(march(), ReportFormat::Pdf).await.unwrap();

        let first = first.unwrap();
        assert!(first.starts_with(b"%PDF"));
        assert_eq!(Some(first), second);
    }
}
