use anyhow::Context;
use clap::{Parser, Subcommand};
use qfinlib_toolkit::backtest::run_moving_average_backtest;
use qfinlib_toolkit::catalog::{self, DASHBOARDS};
use qfinlib_toolkit::pricing::black_scholes_call;
use qfinlib_toolkit::settings::Settings;
use qfinlib_toolkit::synthetic::{
    load_equity_history, load_option_surface, load_swap_curve, SurfaceSynthesizer,
};
use qfinlib_toolkit::MarketDataConfig;
use serde::Serialize;
use std::path::PathBuf;

const HINT_TEXT: &str = "Hint: run `qfinlib-toolkit list` to see the dashboards, \
or one of the engine subcommands listed by `qfinlib-toolkit --help`.";

#[derive(Debug, Parser)]
#[command(
    name = "qfinlib-toolkit",
    about = "Market data, pricing and backtest engines behind the qfinlib dashboards",
    after_help = HINT_TEXT
)]
struct Cli {
    /// Settings file (defaults to ./qfinlib.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of text tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the dashboards and their default ports
    List,

    /// Synthetic close history for a symbol
    History {
        #[arg(long, default_value = "SPY")]
        symbol: String,
        /// Days of history (defaults to monitor.lookback)
        #[arg(long)]
        periods: Option<usize>,
    },

    /// Implied volatility surface around a strike
    Surface {
        #[arg(long, default_value_t = 100.0)]
        spot: f64,
        #[arg(long, default_value_t = 100.0)]
        strike: f64,
    },

    /// Swap curve for a currency
    Curve {
        #[arg(long, default_value = "USD")]
        currency: String,
    },

    /// Black-Scholes call price
    Price {
        #[arg(long, default_value_t = 100.0)]
        spot: f64,
        #[arg(long, default_value_t = 100.0)]
        strike: f64,
        #[arg(long, default_value_t = 0.02)]
        rate: f64,
        #[arg(long, default_value_t = 0.2)]
        vol: f64,
        /// Tenor in trading days
        #[arg(long, default_value_t = 90.0)]
        tenor: f64,
    },

    /// Moving-average crossover backtest
    Backtest {
        #[arg(long, default_value = "SPY")]
        symbol: String,
        #[arg(long)]
        periods: Option<usize>,
        #[arg(long)]
        fast: Option<usize>,
        #[arg(long)]
        slow: Option<usize>,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref()).context("loading settings")?;
    setup_logging(&settings);

    let market = MarketDataConfig::from_settings(&settings.market_data);
    tracing::debug!(?market, "Market data configured");

    match cli.command {
        Command::List => {
            if cli.json {
                return print_json(&DASHBOARDS);
            }
            println!("{:<20} {:>6}  {}", "Dashboard", "Port", "Command");
            println!("{}", "─".repeat(80));
            for app in DASHBOARDS {
                println!("{:<20} {:>6}  {}", app.name, app.default_port, app.command);
                println!("{:<28}{}", "", app.description);
            }
            println!("\nMonitor symbols:  {}", catalog::MONITOR_SYMBOLS.join(", "));
            println!("Strategy symbols: {}", catalog::STRATEGY_SYMBOLS.join(", "));
            println!("Swap currencies:  {}", catalog::SWAP_CURRENCIES.join(", "));
        }

        Command::History { symbol, periods } => {
            let periods = periods.unwrap_or(settings.monitor.lookback);
            let path = load_equity_history(&symbol, periods, &market)?;
            if cli.json {
                return print_json(&path);
            }
            println!("{} close ({} days)", path.symbol, path.len());
            for point in &path.points {
                println!("{}  {:>12.4}", point.timestamp.format("%Y-%m-%d"), point.close);
            }
        }

        Command::Surface { spot, strike } => {
            let (maturities, strikes) = SurfaceSynthesizer::pricing_grid(strike);
            let surface = load_option_surface(spot, &maturities, &strikes, &market)?;
            if cli.json {
                return print_json(&surface);
            }
            println!("{:>10} {:>12} {:>10}", "Maturity", "Strike", "Vol");
            for row in &surface {
                println!("{:>10} {:>12.4} {:>9.2}%", row.maturity, row.strike, row.vol * 100.0);
            }
        }

        Command::Curve { currency } => {
            let curve = load_swap_curve(&currency, &market);
            if cli.json {
                return print_json(&curve);
            }
            println!("{} swap curve", curve.currency);
            println!("{:>12} {:>10}", "Tenor (y)", "Rate");
            for point in &curve.points {
                println!("{:>12} {:>9.3}%", point.tenor_years, point.swap_rate * 100.0);
            }
        }

        Command::Price {
            spot,
            strike,
            rate,
            vol,
            tenor,
        } => {
            let price = black_scholes_call(spot, strike, rate, vol, tenor)?;
            if cli.json {
                return print_json(&serde_json::json!({ "call_price": price }));
            }
            println!("Call price: {:.2}", price);
        }

        Command::Backtest {
            symbol,
            periods,
            fast,
            slow,
        } => {
            let periods = periods.unwrap_or(settings.backtest.periods);
            let fast = fast.unwrap_or(settings.backtest.fast);
            let slow = slow.unwrap_or(settings.backtest.slow);

            let result = run_moving_average_backtest(&symbol, periods, fast, slow, &market)?;
            if cli.json {
                return print_json(&result);
            }

            println!("{}", result.metrics);
            println!("\nSignal changes:");
            for trade in &result.trades {
                println!(
                    "  {}  {:>+3}  @ {:.4}",
                    trade.timestamp.format("%Y-%m-%d"),
                    i8::from(trade.signal),
                    trade.fill_price
                );
            }
            result.metrics.print_report();
        }
    }

    Ok(())
}

fn setup_logging(settings: &Settings) {
    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
