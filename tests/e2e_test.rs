use qfinlib_toolkit::backtest::{run_moving_average_backtest, MovingAverageBacktester};
use qfinlib_toolkit::catalog;
use qfinlib_toolkit::market::StaticMarketSource;
use qfinlib_toolkit::pricing::black_scholes_call;
use qfinlib_toolkit::synthetic::{
    load_equity_history, load_option_surface, load_swap_curve, SurfaceSynthesizer,
};
use qfinlib_toolkit::*;

#[test]
fn test_e2e_workflow() {
    // Initialize logging
    let _ = tracing_subscriber::fmt::try_init();

    println!("=== Starting E2E Test ===\n");
    let market = MarketDataConfig::synthetic();

    // 1. Market monitor
    println!("1. Market monitor history...");
    for symbol in catalog::MONITOR_SYMBOLS {
        let path = load_equity_history(symbol, 180, &market).unwrap();
        assert_eq!(path.len(), 180);
        assert_eq!(path.symbol, *symbol);
        println!("   ✓ {} last close: {:.2}", symbol, path.last().unwrap().close);
    }

    // 2. Swap rate monitor
    println!("\n2. Swap curves...");
    for currency in catalog::SWAP_CURRENCIES {
        let curve = load_swap_curve(currency, &market);
        assert_eq!(curve.points.len(), 8);
        println!(
            "   ✓ {} 10y: {:.3}%",
            currency,
            curve.points[5].swap_rate * 100.0
        );
    }

    // 3. Trade pricing
    println!("\n3. Trade pricing...");
    let price = black_scholes_call(100.0, 100.0, 0.02, 0.2, 90.0).unwrap();
    assert!(price > 0.0 && price < 100.0);
    println!("   ✓ Call price: {:.2}", price);

    let (maturities, strikes) = SurfaceSynthesizer::pricing_grid(100.0);
    let surface = load_option_surface(100.0, &maturities, &strikes, &market).unwrap();
    assert_eq!(surface.len(), 25);
    println!("   ✓ Surface points: {}", surface.len());

    // 4. Strategy lab
    println!("\n4. Strategy lab backtests...");
    for symbol in catalog::STRATEGY_SYMBOLS {
        let result = run_moving_average_backtest(symbol, 250, 20, 60, &market).unwrap();
        assert_eq!(result.equity_curve.len(), 250);
        assert!(result.metrics.sharpe.is_finite());
        println!("   ✓ {}: {}", symbol, result.metrics);
    }

    println!("\n=== E2E Test Complete ===");
}

#[test]
fn test_static_source_drives_all_synthesizers() {
    let market = MarketDataConfig::with_source(
        StaticMarketSource::new()
            .with_discount_rate(0.03)
            .with_volatility(0.1)
            .with_fx_spot(1.25)
            .with_surface_vol(0.18),
    );

    let path = load_equity_history("SPY", 10, &market).unwrap();
    let synthetic = load_equity_history("SPY", 10, &MarketDataConfig::synthetic()).unwrap();
    // Same seed, different parameters
    assert_ne!(path.closes(), synthetic.closes());
    // Start is the quoted spot scaled by 100
    assert!((path.points[0].close / 125.0 - 1.0).abs() < 0.05);

    let curve = load_swap_curve("EUR", &market);
    let expected = 0.03 + 0.002 * 2f64.ln() + 0.0005 * 1f64.sin();
    assert!((curve.points[0].swap_rate - expected).abs() < 1e-12);

    let surface = load_option_surface(100.0, &[30, 90], &[90.0, 110.0], &market).unwrap();
    assert!(surface.iter().all(|p| p.vol == 0.18));
}

#[test]
fn test_degenerate_backtest_is_well_formed() {
    let path = load_equity_history("IWM", 40, &MarketDataConfig::synthetic()).unwrap();
    let result = MovingAverageBacktester::new(20, 60).unwrap().run(&path);

    assert!(result.trades.is_empty());
    assert_eq!(result.equity_curve.len(), 40);
    assert!(result.metrics.sharpe.is_finite());
    assert_eq!(result.metrics.total_trades, 0);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["trades"].as_array().unwrap().len(), 0);
    assert!(json["periods"][0]["signal"].is_null());
}

#[test]
fn test_invalid_inputs_are_labelled() {
    let err = black_scholes_call(100.0, 100.0, 0.02, 0.0, 90.0).unwrap_err();
    assert!(err.is_invalid_parameter());
    assert!(err.to_string().contains("vol"));

    let err = load_equity_history("SPY", 0, &MarketDataConfig::synthetic()).unwrap_err();
    assert!(err.is_invalid_parameter());

    let err = load_option_surface(0.0, &[30], &[100.0], &MarketDataConfig::synthetic()).unwrap_err();
    assert!(matches!(err, ToolkitError::InvalidParameter { name: "spot", .. }));
}
