//! Toolkit settings.
//!
//! Loaded from an optional `qfinlib.toml` (or an explicit path) layered
//! under `QFINLIB__*` environment variables, e.g.
//! `QFINLIB__MARKET_DATA__MODE=static`.

use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_FILE: &str = "qfinlib";
const ENV_PREFIX: &str = "QFINLIB";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// `tracing_subscriber` env-filter directive
    pub log_filter: String,
    pub market_data: MarketDataSettings,
    pub backtest: BacktestSettings,
    pub monitor: MonitorSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: "qfinlib_toolkit=info".to_string(),
            market_data: MarketDataSettings::default(),
            backtest: BacktestSettings::default(),
            monitor: MonitorSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketDataMode {
    /// No external source, synthetic formulas only
    #[default]
    Synthetic,
    /// Serve the configured snapshot through `StaticMarketSource`
    Static,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketDataSettings {
    pub mode: MarketDataMode,
    pub discount_rate: Option<f64>,
    pub forward_rate: Option<f64>,
    pub volatility: Option<f64>,
    pub fx_spot: Option<f64>,
    /// Flat implied vol served by the static surface lookup
    pub surface_vol: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestSettings {
    pub periods: usize,
    pub fast: usize,
    pub slow: usize,
}

impl Default for BacktestSettings {
    fn default() -> Self {
        Self {
            periods: 250,
            fast: 20,
            slow: 60,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorSettings {
    /// Days of history shown by the market monitor
    pub lookback: usize,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self { lookback: 180 }
    }
}

impl Settings {
    /// Load settings from `path`, or from `./qfinlib.*` when no path is given.
    /// An explicit path must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> crate::Result<Self> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_FILE).required(false),
        };

        let settings = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = settings.try_deserialize()?;
        tracing::debug!(
            mode = ?settings.market_data.mode,
            log_filter = %settings.log_filter,
            "Loaded settings"
        );

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp_toml(name: &str, body: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "qfinlib-settings-{}-{}.toml",
            name,
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();

        assert_eq!(settings.log_filter, "qfinlib_toolkit=info");
        assert_eq!(settings.market_data.mode, MarketDataMode::Synthetic);
        assert_eq!(settings.backtest.periods, 250);
        assert_eq!(settings.backtest.fast, 20);
        assert_eq!(settings.backtest.slow, 60);
        assert_eq!(settings.monitor.lookback, 180);
    }

    #[test]
    fn test_load_from_file_keeps_unset_defaults() {
        let path = write_temp_toml(
            "partial",
            r#"
[market_data]
mode = "static"
discount_rate = 0.03
volatility = 0.25

[backtest]
fast = 10
"#,
        );

        let settings = Settings::load(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.market_data.mode, MarketDataMode::Static);
        assert_eq!(settings.market_data.discount_rate, Some(0.03));
        assert_eq!(settings.market_data.volatility, Some(0.25));
        assert_eq!(settings.market_data.forward_rate, None);
        assert_eq!(settings.backtest.fast, 10);
        assert_eq!(settings.backtest.slow, 60);
        assert_eq!(settings.monitor.lookback, 180);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let path = std::env::temp_dir().join("qfinlib-settings-does-not-exist.toml");
        let result = Settings::load(Some(&path));

        assert!(matches!(result, Err(crate::ToolkitError::Settings(_))));
    }
}
