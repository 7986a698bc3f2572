use crate::error::ToolkitError;
use crate::Result;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Market scalars observed on a date. Every field is optional; consumers
/// fall back field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub as_of: NaiveDate,
    pub discount_rate: Option<f64>,
    pub forward_rate: Option<f64>,
    pub volatility: Option<f64>,
    pub fx_spot: Option<f64>,
}

/// External market data capability
pub trait MarketDataSource: Send + Sync {
    /// Source name for logging
    fn name(&self) -> &str;

    /// Snapshot as of `as_of`, or today when `None`.
    /// Fails with `ConfigurationAbsent` when the source cannot serve data.
    fn snapshot(&self, as_of: Option<NaiveDate>) -> Result<MarketSnapshot>;

    /// Implied vol for an expiry (in years), strike and spot, if the
    /// source carries a surface
    fn surface_lookup(&self, expiry_years: f64, strike: f64, spot: f64) -> Option<f64>;
}

/// Serves a fixed snapshot and an optional flat vol surface
#[derive(Debug, Clone, PartialEq)]
pub struct StaticMarketSource {
    pub discount_rate: Option<f64>,
    pub forward_rate: Option<f64>,
    pub volatility: Option<f64>,
    pub fx_spot: Option<f64>,
    pub surface_vol: Option<f64>,
}

impl StaticMarketSource {
    pub fn new() -> Self {
        Self {
            discount_rate: None,
            forward_rate: None,
            volatility: None,
            fx_spot: None,
            surface_vol: None,
        }
    }

    pub fn with_discount_rate(mut self, rate: f64) -> Self {
        self.discount_rate = Some(rate);
        self
    }

    pub fn with_forward_rate(mut self, rate: f64) -> Self {
        self.forward_rate = Some(rate);
        self
    }

    pub fn with_volatility(mut self, vol: f64) -> Self {
        self.volatility = Some(vol);
        self
    }

    pub fn with_fx_spot(mut self, spot: f64) -> Self {
        self.fx_spot = Some(spot);
        self
    }

    pub fn with_surface_vol(mut self, vol: f64) -> Self {
        self.surface_vol = Some(vol);
        self
    }

    fn has_data(&self) -> bool {
        self.discount_rate.is_some()
            || self.forward_rate.is_some()
            || self.volatility.is_some()
            || self.fx_spot.is_some()
            || self.surface_vol.is_some()
    }
}

impl Default for StaticMarketSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketDataSource for StaticMarketSource {
    fn name(&self) -> &str {
        "static"
    }

    fn snapshot(&self, as_of: Option<NaiveDate>) -> Result<MarketSnapshot> {
        if !self.has_data() {
            return Err(ToolkitError::ConfigurationAbsent(
                "static source has no market fields configured".to_string(),
            ));
        }

        Ok(MarketSnapshot {
            as_of: as_of.unwrap_or_else(|| Utc::now().date_naive()),
            discount_rate: self.discount_rate,
            forward_rate: self.forward_rate,
            volatility: self.volatility,
            fx_spot: self.fx_spot,
        })
    }

    fn surface_lookup(&self, _expiry_years: f64, _strike: f64, _spot: f64) -> Option<f64> {
        self.surface_vol
    }
}
