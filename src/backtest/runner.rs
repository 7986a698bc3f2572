use crate::backtest::metrics::{BacktestMetrics, TradeRecord};
use crate::error::ToolkitError;
use crate::indicators::rolling_sma;
use crate::market::MarketDataConfig;
use crate::models::{PricePath, Signal};
use crate::synthetic::load_equity_history;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Signal when the fast and slow means are equal. Only a strictly higher
/// fast mean goes long.
pub const TIE_SIGNAL: Signal = Signal::Short;

/// Return booked in the first period, which has no prior close
pub const FIRST_PERIOD_RETURN: f64 = 0.0;

/// One point of the equity curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub timestamp: DateTime<Utc>,
    pub equity: f64,
}

/// Per-period backtest frame. Means and signal are `None` during the
/// rolling-window warm-up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BacktestPeriod {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
    pub fast_ma: Option<f64>,
    pub slow_ma: Option<f64>,
    pub signal: Option<Signal>,
    pub pnl: f64,
    pub equity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    pub equity_curve: Vec<EquityPoint>,
    pub trades: Vec<TradeRecord>,
    pub metrics: BacktestMetrics,
    pub periods: Vec<BacktestPeriod>,
}

/// Moving-average crossover backtester: long when the fast mean is
/// above the slow mean, short otherwise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovingAverageBacktester {
    fast: usize,
    slow: usize,
}

impl MovingAverageBacktester {
    /// Both windows must be at least 1. `fast < slow` is conventional
    /// but not required.
    pub fn new(fast: usize, slow: usize) -> Result<Self> {
        if fast < 1 {
            return Err(ToolkitError::invalid("fast", "window must be at least 1"));
        }
        if slow < 1 {
            return Err(ToolkitError::invalid("slow", "window must be at least 1"));
        }

        Ok(Self { fast, slow })
    }

    /// Crossover signal for one period, `None` until both means exist
    pub fn signal(fast_ma: Option<f64>, slow_ma: Option<f64>) -> Option<Signal> {
        let (fast, slow) = (fast_ma?, slow_ma?);
        if fast > slow {
            Some(Signal::Long)
        } else {
            Some(TIE_SIGNAL)
        }
    }

    /// Run the backtest over `path`.
    ///
    /// Return statistics cover only the periods where a position was held.
    /// A window longer than the path leaves every signal undefined, which
    /// yields a flat equity curve, no trades and zero metrics.
    pub fn run(&self, path: &PricePath) -> BacktestResult {
        let closes = path.closes();
        let fast_ma = rolling_sma(&closes, self.fast);
        let slow_ma = rolling_sma(&closes, self.slow);

        let mut periods = Vec::with_capacity(closes.len());
        let mut trades = Vec::new();
        let mut pnl = Vec::with_capacity(closes.len());
        let mut equity = 1.0;

        let mut prev_signal: Option<Signal> = None;
        let mut prev_close: Option<f64> = None;

        for (i, point) in path.points.iter().enumerate() {
            let signal = Self::signal(fast_ma[i], slow_ma[i]);

            let simple_return = match prev_close {
                Some(prev) => point.close / prev - 1.0,
                None => FIRST_PERIOD_RETURN,
            };
            // Position held over this period is the previous period's signal
            let period_pnl = prev_signal.map_or(0.0, |s| s.as_f64() * simple_return);
            equity *= 1.0 + period_pnl;

            if let (Some(prev), Some(current)) = (prev_signal, signal) {
                if prev != current {
                    trades.push(TradeRecord {
                        timestamp: point.timestamp,
                        fill_price: point.close,
                        signal: current,
                    });
                }
            }

            // Flat warm-up periods stay out of the return statistics
            if prev_signal.is_some() || (i == 0 && signal.is_some()) {
                pnl.push(period_pnl);
            }
            periods.push(BacktestPeriod {
                timestamp: point.timestamp,
                close: point.close,
                fast_ma: fast_ma[i],
                slow_ma: slow_ma[i],
                signal,
                pnl: period_pnl,
                equity,
            });

            prev_signal = signal;
            prev_close = Some(point.close);
        }

        let equity_curve: Vec<EquityPoint> = periods
            .iter()
            .map(|p| EquityPoint {
                timestamp: p.timestamp,
                equity: p.equity,
            })
            .collect();
        let equity_values: Vec<f64> = equity_curve.iter().map(|e| e.equity).collect();
        let metrics = BacktestMetrics::from_returns(&pnl, &equity_values, trades.len());

        tracing::info!(
            symbol = %path.symbol,
            fast = self.fast,
            slow = self.slow,
            periods = periods.len(),
            trades = trades.len(),
            "Backtest complete: {}",
            metrics
        );

        BacktestResult {
            equity_curve,
            trades,
            metrics,
            periods,
        }
    }
}

/// Strategy lab entry point: synthesize `periods` closes for `symbol`
/// and backtest a `fast`/`slow` crossover on them
pub fn run_moving_average_backtest(
    symbol: &str,
    periods: usize,
    fast: usize,
    slow: usize,
    market: &MarketDataConfig,
) -> Result<BacktestResult> {
    let backtester = MovingAverageBacktester::new(fast, slow)?;
    let path = load_equity_history(symbol, periods, market)?;
    Ok(backtester.run(&path))
}
