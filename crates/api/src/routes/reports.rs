//! Report download routes.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use cashflow_core::reports::{ReportFormat, ReportMonth, ReportService};
use cashflow_db::ExpenseRepository;
use cashflow_shared::AppError;
use serde::Deserialize;
use tracing::info;

use crate::{AppState, error::ApiError};

/// Header carrying the month for PDF downloads.
pub const MONTH_HEADER: &str = "month";

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/report/excel", get(get_excel_report))
        .route("/report/pdf", get(get_pdf_report))
}

/// Query parameters for report downloads.
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    /// Month as `YYYY-MM` or `YYYY-MM-DD`.
    pub month: Option<String>,
}

/// GET `/report/excel?month=YYYY-MM` - Download the month's report as a workbook.
async fn get_excel_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Response, ApiError> {
    let month = parse_month(query.month.as_deref())?;
    generate(&state, month, ReportFormat::Excel).await
}

/// GET `/report/pdf` - Download the month's report as PDF.
///
/// The month comes from the `month` header; the query parameter is accepted too.
async fn get_pdf_report(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ReportQuery>,
) -> Result<Response, ApiError> {
    let month = parse_month(pdf_month_input(&headers, query.month.as_deref()))?;
    generate(&state, month, ReportFormat::Pdf).await
}

/// The `month` header wins unless it is blank.
fn pdf_month_input<'a>(headers: &'a HeaderMap, query: Option<&'a str>) -> Option<&'a str> {
    headers
        .get(MONTH_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
        .or(query)
}

fn parse_month(raw: Option<&str>) -> Result<ReportMonth, ApiError> {
    let raw = raw
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| AppError::Validation("month is required".to_string()))?;
    Ok(raw.parse::<ReportMonth>()?)
}

async fn generate(
    state: &AppState,
    month: ReportMonth,
    format: ReportFormat,
) -> Result<Response, ApiError> {
    let repo = Arc::new(ExpenseRepository::new((*state.db).clone()));
    let service = ReportService::new(repo, Arc::clone(&state.report));

    let Some(bytes) = service.generate(month, format).await? else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    let file_name = format.file_name(month);
    info!(%month, %format, size = bytes.len(), file = %file_name, "Serving report");

    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}
