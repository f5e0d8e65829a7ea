//! JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use cashflow_core::expenses::{ExpenseError, RepositoryError};
use cashflow_core::reports::ReportError;
use cashflow_shared::AppError;
use serde_json::json;
use tracing::error;

/// An [`AppError`] rendered as `{"error": <code>, "message": <text>}`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Server-side details stay in the logs.
        let message = if status.is_server_error() {
            error!(error = %self.0, "Request failed");
            "An error occurred".to_string()
        } else {
            self.0.to_string()
        };

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": message
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        Self(err.into())
    }
}

impl From<ExpenseError> for ApiError {
    fn from(err: ExpenseError) -> Self {
        Self(err.into())
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        Self(err.into())
    }
}
