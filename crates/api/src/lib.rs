//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - Report download endpoints (PDF and Excel)
//! - Expense endpoints
//! - JSON error responses

pub mod error;
pub mod routes;

use axum::Router;
use cashflow_core::reports::ReportSettings;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Report settings, built once at startup.
    pub report: Arc<ReportSettings>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::routes())
        .nest("/api", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
