use serde::Serialize;

/// A dashboard fronting one of the toolkit's engines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardApp {
    pub name: &'static str,
    pub command: &'static str,
    pub description: &'static str,
    pub default_port: u16,
}

pub const DASHBOARDS: &[DashboardApp] = &[
    DashboardApp {
        name: "Market Monitor",
        command: "qfinlib-toolkit.market-monitor.equity-monitor",
        description: "Recent performance of popular tickers from synthetic or sourced history.",
        default_port: 8051,
    },
    DashboardApp {
        name: "Swap Rate Monitor",
        command: "qfinlib-toolkit.market-monitor.swap-rate-monitor",
        description: "Latest swap curve levels across major currencies.",
        default_port: 8061,
    },
    DashboardApp {
        name: "Trade Pricing",
        command: "qfinlib-toolkit.trade-pricing.trade-pricer",
        description: "Vanilla call pricer with an implied volatility surface.",
        default_port: 8052,
    },
    DashboardApp {
        name: "Strategy Lab",
        command: "qfinlib-toolkit.strategy-lab.strategy-generator",
        description: "Moving-average crossover backtests and parameter sweeps.",
        default_port: 8053,
    },
    DashboardApp {
        name: "Portal",
        command: "qfinlib-toolkit.portal",
        description: "Launch point linking the other dashboards.",
        default_port: 8050,
    },
];

/// Tickers offered by the market monitor
pub const MONITOR_SYMBOLS: &[&str] = &["SPY", "QQQ", "GLD", "TLT", "BTC-USD"];

/// Tickers offered by the strategy lab
pub const STRATEGY_SYMBOLS: &[&str] = &["SPY", "QQQ", "EEM", "IWM"];

/// Currencies offered by the swap rate monitor
pub const SWAP_CURRENCIES: &[&str] = &["USD", "EUR", "GBP", "JPY"];

/// Find a dashboard by command or (case-insensitive) name
pub fn lookup(key: &str) -> Option<&'static DashboardApp> {
    DASHBOARDS
        .iter()
        .find(|app| app.command == key || app.name.eq_ignore_ascii_case(key))
}
