pub mod metrics;
pub mod runner;

pub use metrics::{BacktestMetrics, TradeRecord, SHARPE_EPSILON};
pub use runner::{
    run_moving_average_backtest, BacktestPeriod, BacktestResult, EquityPoint,
    MovingAverageBacktester, FIRST_PERIOD_RETURN, TIE_SIGNAL,
};
