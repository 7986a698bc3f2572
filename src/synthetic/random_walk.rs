use crate::error::ToolkitError;
use crate::market::MarketDataConfig;
use crate::models::{PricePath, PricePoint};
use crate::{Result, TRADING_DAYS_PER_YEAR};
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Geometric Brownian motion parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkParams {
    pub start: f64,
    pub drift: f64,
    pub vol: f64,
}

impl Default for WalkParams {
    fn default() -> Self {
        Self {
            start: 100.0,
            drift: 0.01,
            vol: 0.2,
        }
    }
}

impl WalkParams {
    /// Parameters implied by the market source, or the defaults when
    /// the config is synthetic or the source is unavailable.
    /// Market spot is quoted per unit and scaled by 100.
    pub fn from_market(market: &MarketDataConfig) -> Self {
        let Some(snapshot) = market.snapshot(None) else {
            return Self::default();
        };

        Self {
            start: snapshot.fx_spot.unwrap_or(100.0) * 100.0,
            drift: snapshot
                .forward_rate
                .or(snapshot.discount_rate)
                .unwrap_or(0.01),
            vol: snapshot.volatility.unwrap_or(0.2),
        }
    }
}

/// Generates daily GBM close paths, seeded per symbol so the same
/// symbol always yields the same path
#[derive(Debug, Clone, Default)]
pub struct RandomWalkGenerator {
    params: WalkParams,
}

impl RandomWalkGenerator {
    pub fn new(params: WalkParams) -> Self {
        Self { params }
    }

    pub fn from_market(market: &MarketDataConfig) -> Self {
        Self::new(WalkParams::from_market(market))
    }

    /// Seed derived from the symbol
    pub fn seed_for(symbol: &str) -> u64 {
        symbol.len() as u64
    }

    /// Generate `periods` daily closes ending now
    pub fn generate(&self, symbol: &str, periods: usize) -> Result<PricePath> {
        self.generate_until(symbol, periods, Utc::now())
    }

    /// Generate `periods` daily closes, the last stamped at `end`
    pub fn generate_until(
        &self,
        symbol: &str,
        periods: usize,
        end: DateTime<Utc>,
    ) -> Result<PricePath> {
        if periods < 1 {
            return Err(ToolkitError::invalid("periods", "must be at least 1"));
        }

        let start_time = i64::try_from(periods - 1)
            .ok()
            .and_then(Duration::try_days)
            .and_then(|span| end.checked_sub_signed(span))
            .ok_or_else(|| {
                ToolkitError::invalid("periods", "history reaches past the calendar range")
            })?;

        let WalkParams { start, drift, vol } = self.params;
        let dt = 1.0 / TRADING_DAYS_PER_YEAR;
        let increments = Normal::new((drift - 0.5 * vol * vol) * dt, vol * dt.sqrt())
            .map_err(|e| ToolkitError::invalid("vol", e.to_string()))?;

        let mut rng = StdRng::seed_from_u64(Self::seed_for(symbol));
        let mut points = Vec::with_capacity(periods);
        let mut log_level = 0.0;

        for i in 0..periods {
            log_level += increments.sample(&mut rng);
            points.push(PricePoint {
                timestamp: start_time + Duration::days(i as i64),
                close: start * f64::exp(log_level),
            });
        }

        tracing::debug!(
            symbol,
            periods,
            start,
            drift,
            vol,
            "Generated synthetic price path"
        );

        Ok(PricePath::new(symbol, points))
    }
}

/// Market monitor entry point: history for `symbol` under `market`
pub fn load_equity_history(
    symbol: &str,
    periods: usize,
    market: &MarketDataConfig,
) -> Result<PricePath> {
    RandomWalkGenerator::from_market(market).generate(symbol, periods)
}
