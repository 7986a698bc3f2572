use crate::models::Signal;
use crate::TRADING_DAYS_PER_YEAR;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Added to annualized vol so a flat pnl series gives a finite Sharpe
pub const SHARPE_EPSILON: f64 = 1e-9;

/// A signal change: the period it happened in, the close it filled at
/// and the new direction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub timestamp: DateTime<Utc>,
    pub fill_price: f64,
    pub signal: Signal,
}

/// Summary statistics of a backtest
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BacktestMetrics {
    pub annualized_return: f64,
    pub annualized_vol: f64,
    pub sharpe: f64,

    /// Final equity minus 1
    pub total_return: f64,
    /// Largest peak-to-trough fall of the equity curve, in percent
    pub max_drawdown_pct: f64,
    pub total_trades: usize,
}

impl BacktestMetrics {
    /// Calculate metrics from per-period pnl and the matching equity curve
    pub fn from_returns(pnl: &[f64], equity: &[f64], total_trades: usize) -> Self {
        if pnl.is_empty() {
            return Self::empty();
        }

        let mean = pnl.iter().sum::<f64>() / pnl.len() as f64;
        let std_dev = sample_std_dev(pnl, mean);

        let annualized_return = mean * TRADING_DAYS_PER_YEAR;
        let annualized_vol = std_dev * TRADING_DAYS_PER_YEAR.sqrt();
        let sharpe = annualized_return / (annualized_vol + SHARPE_EPSILON);

        let total_return = equity.last().map(|e| e - 1.0).unwrap_or(0.0);

        Self {
            annualized_return,
            annualized_vol,
            sharpe,
            total_return,
            max_drawdown_pct: Self::calculate_drawdown(equity),
            total_trades,
        }
    }

    /// Empty metrics for when no periods were simulated
    pub fn empty() -> Self {
        Self {
            annualized_return: 0.0,
            annualized_vol: 0.0,
            sharpe: 0.0,
            total_return: 0.0,
            max_drawdown_pct: 0.0,
            total_trades: 0,
        }
    }

    /// Calculate maximum drawdown (percent of running peak) of an equity
    /// curve that starts from 1.0
    fn calculate_drawdown(equity: &[f64]) -> f64 {
        let mut peak = 1.0_f64;
        let mut max_dd_pct = 0.0;

        for &value in equity {
            if value > peak {
                peak = value;
            }

            if peak > 0.0 {
                let drawdown_pct = (peak - value) / peak * 100.0;
                if drawdown_pct > max_dd_pct {
                    max_dd_pct = drawdown_pct;
                }
            }
        }

        max_dd_pct
    }

    /// Print a formatted report to stdout
    pub fn print_report(&self) {
        println!("\n╔═══════════════════════════════════════════════════════╗");
        println!("║              BACKTEST PERFORMANCE REPORT              ║");
        println!("╚═══════════════════════════════════════════════════════╝\n");

        println!("📊 RETURNS");
        println!(
            "  Total Return:          {:+.2}%",
            self.total_return * 100.0
        );
        println!(
            "  Annualized Return:     {:+.2}%",
            self.annualized_return * 100.0
        );
        println!(
            "  Annualized Vol:        {:.2}%",
            self.annualized_vol * 100.0
        );

        println!("\n⚠️  RISK METRICS");
        println!("  Sharpe Ratio:          {:.2}", self.sharpe);
        println!("  Max Drawdown:          {:.2}%", self.max_drawdown_pct);

        println!("\n📈 TRADE STATISTICS");
        println!("  Signal Changes:        {}", self.total_trades);

        println!("\n═══════════════════════════════════════════════════════\n");
    }
}

impl fmt::Display for BacktestMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ann. Return: {:.2}% | Ann. Vol: {:.2}% | Sharpe: {:.2}",
            self.annualized_return * 100.0,
            self.annualized_vol * 100.0,
            self.sharpe
        )
    }
}

/// Sample standard deviation (n - 1); 0 with fewer than two values
fn sample_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    let variance = values
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / (values.len() - 1) as f64;

    variance.sqrt()
}
