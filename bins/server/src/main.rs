//! CashFlow API Server
//!
//! Main entry point for the CashFlow backend service.

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cashflow_api::{AppState, create_router};
use cashflow_core::reports::ReportSettings;
use cashflow_db::{connect_with, migration::Migrator};
use cashflow_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cashflow=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;

    // Connect to database and bring the schema up to date
    let db = connect_with(&config.database).await?;
    info!("Connected to database");
    Migrator::up(&db, None).await?;
    info!("Migrations applied");

    let report = ReportSettings::from_config(&config.report);
    info!(
        currency_symbol = %report.currency_symbol,
        rounding = ?report.rounding,
        "Report settings loaded"
    );

    // Create application state
    let state = AppState {
        db: Arc::new(db),
        report: Arc::new(report),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
