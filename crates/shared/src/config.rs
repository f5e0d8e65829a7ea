//! Application configuration management.

use rust_decimal::RoundingStrategy;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Expense report configuration.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Rounding applied to converted report amounts.
///
/// Amounts are rounded to two decimal places per line and again for the total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// 0.125 -> 0.13, -0.125 -> -0.13.
    #[default]
    HalfAwayFromZero,
    /// Banker's rounding: 0.125 -> 0.12, 0.135 -> 0.14.
    HalfEven,
}

impl RoundingMode {
    /// Returns the matching `rust_decimal` strategy.
    #[must_use]
    pub const fn strategy(self) -> RoundingStrategy {
        match self {
            Self::HalfAwayFromZero => RoundingStrategy::MidpointAwayFromZero,
            Self::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }
}

/// Expense report configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Display currency symbol; selects the display multiplier.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Rounding mode for converted amounts.
    #[serde(default)]
    pub rounding: RoundingMode,
    /// Author written into document metadata.
    #[serde(default = "default_author")]
    pub author: String,
    /// Greeting line shown in the report header.
    #[serde(default = "default_greeting")]
    pub greeting: String,
    /// Localizable report labels.
    #[serde(default)]
    pub labels: ReportLabels,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            rounding: RoundingMode::default(),
            author: default_author(),
            greeting: default_greeting(),
            labels: ReportLabels::default(),
        }
    }
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_author() -> String {
    "CashFlow".to_string()
}

fn default_greeting() -> String {
    "Hey there".to_string()
}

/// Text labels used by the expense report.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportLabels {
    /// Document title prefix, followed by the month.
    pub expenses_for: String,
    /// Totals heading prefix, followed by the month.
    pub total_spent_in: String,
    /// Header of the amount column.
    pub amount: String,
    /// Label for cash payments.
    pub cash: String,
    /// Label for credit card payments.
    pub credit_card: String,
    /// Label for debit card payments.
    pub debit_card: String,
    /// Label for electronic transfers.
    pub electronic_transfer: String,
}

impl Default for ReportLabels {
    fn default() -> Self {
        Self {
            expenses_for: "Expenses for".to_string(),
            total_spent_in: "Total spent in".to_string(),
            amount: "Amount".to_string(),
            cash: "Cash".to_string(),
            credit_card: "Credit Card".to_string(),
            debit_card: "Debit Card".to_string(),
            electronic_transfer: "Electronic Transfer".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("CASHFLOW").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
