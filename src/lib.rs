// Core modules
pub mod backtest;
pub mod catalog;
pub mod error;
pub mod indicators;
pub mod market;
pub mod models;
pub mod pricing;
pub mod settings;
pub mod synthetic;

// Re-export commonly used types
pub use error::ToolkitError;
pub use market::{MarketDataConfig, MarketDataSource, MarketSnapshot};
pub use models::*;

/// Trading days per year used for annualization and year fractions
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

// Error handling
pub type Result<T> = std::result::Result<T, ToolkitError>;
