//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod expenses;
pub mod health;
pub mod reports;

/// Creates the router mounted under `/api`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(reports::routes())
        .merge(expenses::routes())
}
