use qfinlib_toolkit::backtest::{run_moving_average_backtest, BacktestMetrics};
use qfinlib_toolkit::catalog::STRATEGY_SYMBOLS;
use qfinlib_toolkit::settings::Settings;
use qfinlib_toolkit::MarketDataConfig;

/// Window pairs swept for every symbol
const WINDOWS: &[(usize, usize)] = &[(5, 20), (10, 40), (20, 60), (50, 200)];

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::load(None)?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .init();

    println!("\n╔═══════════════════════════════════════════════════════╗");
    println!("║          STRATEGY LAB CROSSOVER SWEEP                 ║");
    println!("╚═══════════════════════════════════════════════════════╝");

    let market = MarketDataConfig::from_settings(&settings.market_data);
    let periods = settings.backtest.periods;

    let mut all_metrics = Vec::new();

    for symbol in STRATEGY_SYMBOLS {
        for &(fast, slow) in WINDOWS {
            let name = format!("{} {}/{}", symbol, fast, slow);
            match run_moving_average_backtest(symbol, periods, fast, slow, &market) {
                Ok(result) => all_metrics.push((name, result.metrics)),
                Err(e) => eprintln!("❌ Backtest failed for {}: {}", name, e),
            }
        }
    }

    print_summary_comparison(&all_metrics, periods);

    Ok(())
}

fn print_summary_comparison(results: &[(String, BacktestMetrics)], periods: usize) {
    println!("\n{} periods per run\n", periods);
    println!(
        "{:<16} {:>10} {:>10} {:>8} {:>8} {:>8}",
        "Run", "Return%", "AnnVol%", "Sharpe", "MaxDD%", "Trades"
    );
    println!("{}", "─".repeat(66));

    for (name, metrics) in results {
        println!(
            "{:<16} {:>10.2} {:>10.2} {:>8.2} {:>8.2} {:>8}",
            name,
            metrics.total_return * 100.0,
            metrics.annualized_vol * 100.0,
            metrics.sharpe,
            metrics.max_drawdown_pct,
            metrics.total_trades
        );
    }

    println!();

    if let Some((best_name, best)) = results
        .iter()
        .max_by(|a, b| a.1.sharpe.total_cmp(&b.1.sharpe))
    {
        println!("🏆 Best Sharpe: {} ({:.2})", best_name, best.sharpe);
    }

    if let Some((worst_name, worst)) = results
        .iter()
        .min_by(|a, b| a.1.sharpe.total_cmp(&b.1.sharpe))
    {
        println!("⚠️  Worst Sharpe: {} ({:.2})", worst_name, worst.sharpe);
    }

    // Runs whose slow window exceeds the history never trade
    let idle = results.iter().filter(|(_, m)| m.total_trades == 0).count();
    println!("\n📊 Runs without signal changes: {}", idle);

    println!("\n═══════════════════════════════════════════════════════\n");
}
