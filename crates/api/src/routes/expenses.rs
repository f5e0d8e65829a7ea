//! Expense routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use cashflow_core::expenses::{
    Expense, ExpenseError, ExpensesReadOnlyRepository, ExpensesWriteOnlyRepository, NewExpense,
    PaymentType,
};
use cashflow_db::ExpenseRepository;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{AppState, error::ApiError};

/// Creates the expense routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/expenses", get(list_expenses).post(create_expense))
        .route("/expenses/{id}", get(get_expense).delete(delete_expense))
}

// ============================================================================
// Request / Response Types
// ============================================================================

/// Query parameters for listing expenses.
#[derive(Debug, Deserialize)]
pub struct ListExpensesQuery {
    /// Exact title to look up.
    pub title: Option<String>,
}

/// Request body for recording an expense.
#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    /// Short title.
    pub title: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// When the expense happened, e.g. `2024-03-01T14:30:00`.
    pub date: NaiveDateTime,
    /// Amount in the base unit.
    pub amount: Decimal,
    /// Payment type.
    pub payment_type: PaymentType,
}

impl From<CreateExpenseRequest> for NewExpense {
    fn from(req: CreateExpenseRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            date: req.date,
            amount: req.amount,
            payment_type: req.payment_type,
        }
    }
}

/// Expense in responses.
#[derive(Debug, Serialize)]
pub struct ExpenseResponse {
    /// Expense ID.
    pub id: i64,
    /// Title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Date and time.
    pub date: String,
    /// Amount.
    pub amount: String,
    /// Payment type code as stored.
    pub payment_type: i16,
}

impl From<Expense> for ExpenseResponse {
    fn from(expense: Expense) -> Self {
        Self {
            id: expense.id,
            title: expense.title,
            description: expense.description,
            date: expense.date.format("%Y-%m-%dT%H:%M:%S").to_string(),
            amount: expense.amount.to_string(),
            payment_type: expense.payment_type.code(),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET `/expenses` - List expenses, or look one up by `?title=`.
async fn list_expenses(
    State(state): State<AppState>,
    Query(query): Query<ListExpensesQuery>,
) -> Result<Json<Vec<ExpenseResponse>>, ApiError> {
    let repo = ExpenseRepository::new((*state.db).clone());

    let expenses = match query.title {
        Some(title) => repo.get_by_title(&title).await?.into_iter().collect(),
        None => repo.get_all().await?,
    };

    Ok(Json(expenses.into_iter().map(ExpenseResponse::from).collect()))
}

/// GET `/expenses/{id}` - Fetch one expense.
async fn get_expense(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ExpenseResponse>, ApiError> {
    let repo = ExpenseRepository::new((*state.db).clone());

    let expense = repo
        .get_by_id(id)
        .await?
        .ok_or(ExpenseError::NotFound(id))?;

    Ok(Json(expense.into()))
}

/// POST `/expenses` - Record an expense.
async fn create_expense(
    State(state): State<AppState>,
    Json(payload): Json<CreateExpenseRequest>,
) -> Result<Response, ApiError> {
    let input = NewExpense::from(payload);
    input.validate()?;

    let repo = ExpenseRepository::new((*state.db).clone());
    let expense = repo.add(input).await?;
    info!(expense_id = expense.id, "Expense created");

    Ok((StatusCode::CREATED, Json(ExpenseResponse::from(expense))).into_response())
}

/// DELETE `/expenses/{id}` - Delete an expense.
async fn delete_expense(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let repo = ExpenseRepository::new((*state.db).clone());

    if repo.delete(id).await? {
        info!(expense_id = id, "Expense deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ExpenseError::NotFound(id).into())
    }
}
