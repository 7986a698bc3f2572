use crate::error::ensure_positive;
use crate::market::MarketDataConfig;
use crate::models::SurfacePoint;
use crate::Result;

/// Maturities (days) quoted on the trade pricing surface
pub const PRICING_MATURITIES: [u32; 5] = [30, 60, 90, 180, 360];

/// Strike multipliers around the traded strike
pub const PRICING_STRIKE_FACTORS: [f64; 5] = [0.8, 0.9, 1.0, 1.1, 1.2];

const BASE_VOL: f64 = 0.15;
const SMILE_SLOPE: f64 = 0.25;
const TERM_SLOPE: f64 = 0.005;

/// Implied volatility surface, sourced from the market when it carries
/// one and from a placeholder smile otherwise
#[derive(Debug, Clone, Default)]
pub struct SurfaceSynthesizer {
    market: MarketDataConfig,
}

impl SurfaceSynthesizer {
    pub fn new(market: MarketDataConfig) -> Self {
        Self { market }
    }

    /// Placeholder smile: grows with |log-moneyness| and with maturity
    pub fn synthetic_vol(spot: f64, maturity_days: u32, strike: f64) -> f64 {
        BASE_VOL
            + SMILE_SLOPE * (strike / spot).ln().abs()
            + TERM_SLOPE * maturity_days as f64 / 365.0
    }

    /// One row per (maturity, strike), grouped by maturity
    pub fn build(
        &self,
        spot: f64,
        maturities: &[u32],
        strikes: &[f64],
    ) -> Result<Vec<SurfacePoint>> {
        ensure_positive("spot", spot)?;
        for &strike in strikes {
            ensure_positive("strike", strike)?;
        }

        let mut rows = Vec::with_capacity(maturities.len() * strikes.len());
        let mut market_points = 0usize;

        for &maturity in maturities {
            let expiry_years = maturity as f64 / 365.0;
            for &strike in strikes {
                let vol = match self.market.surface(expiry_years, strike, spot) {
                    Some(vol) => {
                        market_points += 1;
                        vol
                    }
                    None => Self::synthetic_vol(spot, maturity, strike),
                };
                rows.push(SurfacePoint {
                    maturity,
                    strike,
                    vol,
                });
            }
        }

        tracing::debug!(
            spot,
            rows = rows.len(),
            market_points,
            "Built volatility surface"
        );

        Ok(rows)
    }

    /// Maturities and strikes shown next to a priced trade
    pub fn pricing_grid(strike: f64) -> (Vec<u32>, Vec<f64>) {
        let strikes = PRICING_STRIKE_FACTORS.iter().map(|f| strike * f).collect();
        (PRICING_MATURITIES.to_vec(), strikes)
    }
}

/// Trade pricing entry point
pub fn load_option_surface(
    spot: f64,
    maturities: &[u32],
    strikes: &[f64],
    market: &MarketDataConfig,
) -> Result<Vec<SurfacePoint>> {
    SurfaceSynthesizer::new(market.clone()).build(spot, maturities, strikes)
}
