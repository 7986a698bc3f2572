use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One simulated close
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
}

/// Daily close series for a symbol, strictly increasing in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePath {
    pub symbol: String,
    pub points: Vec<PricePoint>,
}

impl PricePath {
    pub fn new(symbol: impl Into<String>, points: Vec<PricePoint>) -> Self {
        Self {
            symbol: symbol.into(),
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }
}

/// One row of an implied volatility surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfacePoint {
    /// Maturity in calendar days
    pub maturity: u32,
    pub strike: f64,
    pub vol: f64,
}

/// One tenor of a swap curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapRatePoint {
    pub currency: String,
    pub tenor_years: f64,
    pub swap_rate: f64,
}

/// Par swap curve for a currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapCurve {
    pub currency: String,
    pub points: Vec<SwapRatePoint>,
}

/// Crossover position direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Signal {
    Long,
    Short,
}

impl Signal {
    pub fn as_f64(self) -> f64 {
        match self {
            Signal::Long => 1.0,
            Signal::Short => -1.0,
        }
    }
}

impl From<Signal> for i8 {
    fn from(signal: Signal) -> Self {
        match signal {
            Signal::Long => 1,
            Signal::Short => -1,
        }
    }
}

impl TryFrom<i8> for Signal {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Signal::Long),
            -1 => Ok(Signal::Short),
            other => Err(format!("signal must be 1 or -1, got {}", other)),
        }
    }
}
