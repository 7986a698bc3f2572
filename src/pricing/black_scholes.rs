use crate::error::{ensure_positive, ToolkitError};
use crate::{Result, TRADING_DAYS_PER_YEAR};
use serde::{Deserialize, Serialize};

/// European call inputs. Tenor is in trading days: the year fraction is
/// `tenor_days / 252`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CallOption {
    pub spot: f64,
    pub strike: f64,
    pub rate: f64,
    pub vol: f64,
    pub tenor_days: f64,
}

impl CallOption {
    pub fn new(spot: f64, strike: f64, rate: f64, vol: f64, tenor_days: f64) -> Result<Self> {
        let option = Self {
            spot,
            strike,
            rate,
            vol,
            tenor_days,
        };
        option.validate()?;
        Ok(option)
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("spot", self.spot)?;
        ensure_positive("strike", self.strike)?;
        ensure_positive("vol", self.vol)?;
        ensure_positive("tenor", self.tenor_days)?;
        if !self.rate.is_finite() {
            return Err(ToolkitError::invalid(
                "rate",
                format!("must be finite, got {}", self.rate),
            ));
        }
        Ok(())
    }

    /// Year fraction on the trading-day convention
    pub fn tau(&self) -> f64 {
        self.tenor_days / TRADING_DAYS_PER_YEAR
    }

    pub fn d1_d2(&self) -> (f64, f64) {
        let tau = self.tau();
        let vol_sqrt_tau = self.vol * tau.sqrt();
        let d1 = ((self.spot / self.strike).ln() + (self.rate + 0.5 * self.vol * self.vol) * tau)
            / vol_sqrt_tau;
        (d1, d1 - vol_sqrt_tau)
    }

    /// Black-Scholes call value
    pub fn price(&self) -> Result<f64> {
        self.validate()?;

        let (d1, d2) = self.d1_d2();
        let discount = (-self.rate * self.tau()).exp();
        let price = self.spot * norm_cdf(d1) - self.strike * discount * norm_cdf(d2);

        if !price.is_finite() {
            return Err(ToolkitError::invalid(
                "rate",
                format!("inputs overflow the pricer: {:?}", self),
            ));
        }

        Ok(price)
    }
}

/// Trade pricing entry point
pub fn black_scholes_call(spot: f64, strike: f64, rate: f64, vol: f64, tenor_days: f64) -> Result<f64> {
    CallOption::new(spot, strike, rate, vol, tenor_days)?.price()
}

/// Standard normal CDF, Hart's double precision rational approximation
/// (absolute error ~1e-15)
pub fn norm_cdf(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }

    let z = x.abs();
    let tail = if z > 37.0 {
        0.0
    } else {
        let e = (-0.5 * z * z).exp();
        if z < 7.071_067_811_865_47 {
            let num = (((((3.526_249_659_989_11e-2 * z + 0.700_383_064_443_688) * z
                + 6.373_962_203_531_65)
                * z
                + 33.912_866_078_383)
                * z
                + 112.079_291_497_871)
                * z
                + 221.213_596_169_931)
                * z
                + 220.206_867_912_376;
            let den = ((((((8.838_834_764_831_84e-2 * z + 1.755_667_163_182_64) * z
                + 16.064_177_579_207)
                * z
                + 86.780_732_202_946_1)
                * z
                + 296.564_248_779_674)
                * z
                + 637.333_633_378_831)
                * z
                + 793.826_512_519_948)
                * z
                + 440.413_735_824_752;
            e * num / den
        } else {
            let cf = z + 1.0 / (z + 2.0 / (z + 3.0 / (z + 4.0 / (z + 0.65))));
            e / cf / 2.506_628_274_631
        }
    };

    if x > 0.0 {
        1.0 - tail
    } else {
        tail
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_norm_cdf_reference_values() {
        assert_eq!(norm_cdf(0.0), 0.5);
        assert!((norm_cdf(1.0) - 0.841_344_746_068_542_9).abs() < 1e-14);
        assert!((norm_cdf(-1.96) - 0.024_997_895_148_220_435).abs() < 1e-14);
        assert!((norm_cdf(2.5) - 0.993_790_334_674_223_8).abs() < 1e-14);
        assert!((norm_cdf(-8.5) - 9.479_534_822_203_355e-18).abs() < 1e-20);
        assert_eq!(norm_cdf(40.0), 1.0);
        assert_eq!(norm_cdf(-40.0), 0.0);
    }

    #[test]
    fn test_norm_cdf_symmetry() {
        for i in 0..200 {
            let x = i as f64 * 0.05;
            assert!((norm_cdf(x) + norm_cdf(-x) - 1.0).abs() < 1e-14);
        }
    }

    #[test]
    fn test_atm_call_matches_reference() {
        // Reference from the erfc-based closed form, tau = 90/252
        let price = black_scholes_call(100.0, 100.0, 0.02, 0.2, 90.0).unwrap();

        assert!(price > 0.0 && price < 100.0);
        assert!((price - 5.112_813_905_930_075).abs() < 1e-6, "price {}", price);
    }

    #[test]
    fn test_itm_call_matches_reference() {
        let price = black_scholes_call(110.0, 100.0, 0.05, 0.3, 30.0).unwrap();
        assert!((price - 11.532_384_056_360_442).abs() < 1e-6, "price {}", price);
    }

    #[test]
    fn test_call_bounds() {
        // max(S - K e^{-r tau}, 0) <= C <= S
        let option = CallOption::new(95.0, 100.0, 0.03, 0.25, 180.0).unwrap();
        let price = option.price().unwrap();
        let lower = (option.spot - option.strike * (-option.rate * option.tau()).exp()).max(0.0);

        assert!(price >= lower);
        assert!(price <= option.spot);
    }

    #[test]
    fn test_price_increases_with_vol() {
        let low = black_scholes_call(100.0, 100.0, 0.02, 0.1, 90.0).unwrap();
        let high = black_scholes_call(100.0, 100.0, 0.02, 0.4, 90.0).unwrap();
        assert!(high > low);
    }

    #[test]
    fn test_zero_vol_rejected() {
        let err = black_scholes_call(100.0, 100.0, 0.02, 0.0, 90.0).unwrap_err();
        assert!(matches!(err, ToolkitError::InvalidParameter { name: "vol", .. }));
    }

    #[test]
    fn test_zero_tenor_rejected() {
        let err = black_scholes_call(100.0, 100.0, 0.02, 0.2, 0.0).unwrap_err();
        assert!(matches!(err, ToolkitError::InvalidParameter { name: "tenor", .. }));
    }

    #[test]
    fn test_non_positive_spot_and_strike_rejected() {
        assert!(black_scholes_call(0.0, 100.0, 0.02, 0.2, 90.0).is_err());
        assert!(black_scholes_call(100.0, -1.0, 0.02, 0.2, 90.0).is_err());
        assert!(black_scholes_call(100.0, 100.0, f64::NAN, 0.2, 90.0).is_err());
    }

    #[test]
    fn test_tau_uses_trading_days() {
        let option = CallOption::new(100.0, 100.0, 0.0, 0.2, 252.0).unwrap();
        assert_eq!(option.tau(), 1.0);
    }
}
