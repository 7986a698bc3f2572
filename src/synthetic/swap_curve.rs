use crate::market::MarketDataConfig;
use crate::models::{SwapCurve, SwapRatePoint};

/// Quoted swap tenors in years
pub const TENORS_YEARS: [f64; 8] = [1.0, 2.0, 3.0, 5.0, 7.0, 10.0, 20.0, 30.0];

const WIGGLE: f64 = 0.0005;

/// Level and steepness of the synthetic curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveParams {
    pub base_rate: f64,
    pub slope: f64,
}

impl Default for CurveParams {
    fn default() -> Self {
        Self {
            base_rate: 0.02,
            slope: 0.004,
        }
    }
}

impl CurveParams {
    /// Level from the discount (else forward) rate, slope scaled from the
    /// market vol. Defaults when no snapshot is available.
    pub fn from_market(market: &MarketDataConfig) -> Self {
        match market.snapshot(None) {
            Some(snapshot) => Self {
                base_rate: snapshot
                    .discount_rate
                    .or(snapshot.forward_rate)
                    .unwrap_or(0.025),
                slope: snapshot.volatility.unwrap_or(0.2) * 0.02,
            },
            None => Self::default(),
        }
    }

    pub fn rate(&self, tenor_years: f64) -> f64 {
        self.base_rate + self.slope * tenor_years.ln_1p() + WIGGLE * tenor_years.sin()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SwapCurveSynthesizer {
    params: CurveParams,
}

impl SwapCurveSynthesizer {
    pub fn new(params: CurveParams) -> Self {
        Self { params }
    }

    pub fn from_market(market: &MarketDataConfig) -> Self {
        Self::new(CurveParams::from_market(market))
    }

    /// Par curve over `TENORS_YEARS`. The currency is a label only.
    pub fn build(&self, currency: &str) -> SwapCurve {
        let points = TENORS_YEARS
            .iter()
            .map(|&tenor_years| SwapRatePoint {
                currency: currency.to_string(),
                tenor_years,
                swap_rate: self.params.rate(tenor_years),
            })
            .collect();

        tracing::debug!(
            currency,
            base_rate = self.params.base_rate,
            slope = self.params.slope,
            "Built swap curve"
        );

        SwapCurve {
            currency: currency.to_string(),
            points,
        }
    }
}

/// Swap rate monitor entry point
pub fn load_swap_curve(currency: &str, market: &MarketDataConfig) -> SwapCurve {
    SwapCurveSynthesizer::from_market(market).build(currency)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::StaticMarketSource;

    #[test]
    fn test_curve_shape() {
        for currency in ["USD", "EUR", "GBP", "JPY"] {
            let curve = load_swap_curve(currency, &MarketDataConfig::synthetic());

            assert_eq!(curve.points.len(), 8);
            let tenors: Vec<f64> = curve.points.iter().map(|p| p.tenor_years).collect();
            assert_eq!(tenors, vec![1.0, 2.0, 3.0, 5.0, 7.0, 10.0, 20.0, 30.0]);
            for pair in curve.points.windows(2) {
                assert!(pair[1].tenor_years > pair[0].tenor_years);
            }
            assert!(curve.points.iter().all(|p| p.currency == currency));
        }
    }

    #[test]
    fn test_synthetic_rates() {
        let curve = SwapCurveSynthesizer::default().build("USD");

        let one_year = 0.02 + 0.004 * 2f64.ln() + 0.0005 * 1f64.sin();
        assert!((curve.points[0].swap_rate - one_year).abs() < 1e-15);

        let thirty_year = 0.02 + 0.004 * 31f64.ln() + 0.0005 * 30f64.sin();
        assert!((curve.points[7].swap_rate - thirty_year).abs() < 1e-15);
    }

    #[test]
    fn test_currency_does_not_change_shape() {
        let usd = SwapCurveSynthesizer::default().build("USD");
        let jpy = SwapCurveSynthesizer::default().build("JPY");

        for (a, b) in usd.points.iter().zip(&jpy.points) {
            assert_eq!(a.swap_rate, b.swap_rate);
        }
    }

    #[test]
    fn test_market_parameters() {
        let market = MarketDataConfig::with_source(
            StaticMarketSource::new()
                .with_forward_rate(0.035)
                .with_volatility(0.3),
        );

        let params = CurveParams::from_market(&market);

        assert_eq!(params.base_rate, 0.035);
        assert!((params.slope - 0.006).abs() < 1e-15);
    }

    #[test]
    fn test_market_discount_rate_wins() {
        let market = MarketDataConfig::with_source(
            StaticMarketSource::new()
                .with_discount_rate(0.03)
                .with_forward_rate(0.035),
        );

        let params = CurveParams::from_market(&market);

        assert_eq!(params.base_rate, 0.03);
        assert!((params.slope - 0.004).abs() < 1e-15);
    }
}
