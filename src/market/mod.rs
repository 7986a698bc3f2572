// Optional market data collaborator and the config that injects it
pub mod source;

pub use source::{MarketDataSource, MarketSnapshot, StaticMarketSource};

use crate::settings::{MarketDataMode, MarketDataSettings};
use chrono::NaiveDate;
use std::fmt;
use std::sync::Arc;

/// Market data wiring passed into the synthesizers.
///
/// The default is synthetic mode (no source). A source that fails to
/// serve a snapshot is logged and treated as absent.
#[derive(Clone, Default)]
pub struct MarketDataConfig {
    source: Option<Arc<dyn MarketDataSource>>,
}

impl MarketDataConfig {
    pub fn synthetic() -> Self {
        Self { source: None }
    }

    pub fn with_source<S: MarketDataSource + 'static>(source: S) -> Self {
        Self {
            source: Some(Arc::new(source)),
        }
    }

    pub fn from_settings(settings: &MarketDataSettings) -> Self {
        match settings.mode {
            MarketDataMode::Synthetic => Self::synthetic(),
            MarketDataMode::Static => Self::with_source(StaticMarketSource {
                discount_rate: settings.discount_rate,
                forward_rate: settings.forward_rate,
                volatility: settings.volatility,
                fx_spot: settings.fx_spot,
                surface_vol: settings.surface_vol,
            }),
        }
    }

    pub fn is_synthetic(&self) -> bool {
        self.source.is_none()
    }

    /// Snapshot from the configured source, `None` in synthetic mode or
    /// when the source is unavailable
    pub fn snapshot(&self, as_of: Option<NaiveDate>) -> Option<MarketSnapshot> {
        let source = self.source.as_ref()?;

        match source.snapshot(as_of) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::warn!(
                    source = source.name(),
                    "Market data unavailable, using synthetic parameters: {}",
                    e
                );
                None
            }
        }
    }

    pub fn surface(&self, expiry_years: f64, strike: f64, spot: f64) -> Option<f64> {
        self.source
            .as_ref()?
            .surface_lookup(expiry_years, strike, spot)
            .filter(|vol| vol.is_finite())
    }
}

impl fmt::Debug for MarketDataConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarketDataConfig")
            .field("source", &self.source.as_ref().map(|s| s.name()))
            .finish()
    }
}
