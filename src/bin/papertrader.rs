//! Paper trader CLI - run demo sessions and inspect the momentum signal.
//!
//! Output is JSON for easy consumption by host bridges. The `run` command
//! drives the engine against a deterministic synthetic market so the full
//! scan/entry/exit loop can be exercised without any exchange access.

use clap::{Parser, Subcommand};
use papertrader_core::{
    ApiResponse, Candle, CycleMetrics, DisplaySink, EngineConfig, MarketDataProvider,
    SessionRunner, SmaMomentum, Strategy, TradeRecord, TradingEngine,
};
use serde_json::json;
use std::cell::Cell;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "papertrader")]
#[command(about = "Simulated momentum trading engine")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a demo session against a synthetic market
    Run {
        /// Starting virtual capital
        #[arg(short, long, default_value = "1000000")]
        capital: f64,
        /// Maximum simultaneous positions
        #[arg(short, long, default_value = "4")]
        max_positions: usize,
        /// Number of cycles to run
        #[arg(short = 'n', long, default_value = "20")]
        cycles: u64,
        /// Delay between cycles in milliseconds
        #[arg(short, long, default_value = "250")]
        interval_ms: u64,
        /// Momentum averaging window
        #[arg(short, long, default_value = "5")]
        window: usize,
        /// Keep scanning after a trade executes
        #[arg(long)]
        scan_all: bool,
    },
    /// Evaluate the momentum signal on an ad-hoc close series
    Signal {
        /// Comma-separated close prices, oldest first
        #[arg(short, long)]
        closes: String,
        /// Momentum averaging window
        #[arg(short, long, default_value = "5")]
        window: usize,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let output = match cli.command {
        Commands::Run {
            capital,
            max_positions,
            cycles,
            interval_ms,
            window,
            scan_all,
        } => run_session(capital, max_positions, cycles, interval_ms, window, scan_all),
        Commands::Signal { closes, window } => evaluate_signal(&closes, window),
    };

    println!("{}", output);
}

fn run_session(
    capital: f64,
    max_positions: usize,
    cycles: u64,
    interval_ms: u64,
    window: usize,
    scan_all: bool,
) -> String {
    let config = EngineConfig {
        starting_capital: capital,
        max_positions,
        sma_window: window,
        stop_after_first_trade: !scan_all,
        ..Default::default()
    };

    let engine = match TradingEngine::new(config) {
        Ok(engine) => engine,
        Err(e) => {
            return serde_json::to_string_pretty(&ApiResponse::<()>::err(e.to_string())).unwrap()
        }
    };

    let provider = SyntheticProvider::new();
    let mut sink = ConsoleSink::default();
    let mut runner = SessionRunner::new(engine)
        .with_interval(Duration::from_millis(interval_ms))
        .with_max_cycles(cycles);

    let cycles_run = runner.run(&provider, &mut sink);
    let engine = runner.into_engine();

    serde_json::to_string_pretty(&ApiResponse::ok(json!({
        "cycles": cycles_run,
        "snapshot": engine.snapshot(),
        "metrics": engine.metrics(),
        "trades": engine.trade_log().all(),
    })))
    .unwrap()
}

fn evaluate_signal(closes: &str, window: usize) -> String {
    let parsed: Result<Vec<f64>, _> = closes
        .split(',')
        .map(|s| s.trim().parse::<f64>())
        .collect();

    let closes = match parsed {
        Ok(closes) => closes,
        Err(e) => {
            return serde_json::to_string_pretty(&ApiResponse::<()>::err(format!(
                "invalid close series: {e}"
            )))
            .unwrap()
        }
    };

    let now = chrono::Utc::now();
    let candles: Vec<Candle> = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let ts = now - chrono::Duration::minutes((closes.len() - i) as i64);
            Candle::new(ts, close, close, close, close, 0.0)
        })
        .collect();

    match SmaMomentum::new(window).evaluate(&candles) {
        Ok(evaluation) => serde_json::to_string_pretty(&ApiResponse::ok(evaluation)).unwrap(),
        Err(e) => serde_json::to_string_pretty(&ApiResponse::<()>::err(e.to_string())).unwrap(),
    }
}

/// Deterministic market: each instrument follows its own slow sine wave
/// around a base price, advanced one step per ranking call.
struct SyntheticProvider {
    instruments: Vec<(String, f64)>,
    step: Cell<i64>,
}

impl SyntheticProvider {
    fn new() -> Self {
        Self {
            instruments: vec![
                ("BTC/USDT".to_string(), 60_000.0),
                ("ETH/USDT".to_string(), 2_500.0),
                ("SOL/USDT".to_string(), 150.0),
                ("DOGE/USDT".to_string(), 0.12),
            ],
            step: Cell::new(0),
        }
    }

    fn close_at(&self, base: f64, phase: usize, step: i64) -> f64 {
        let t = step as f64 * 0.45 + phase as f64 * 1.3;
        base * (1.0 + 0.03 * t.sin())
    }
}

impl MarketDataProvider for SyntheticProvider {
    fn rank_instruments(
        &self,
        _quote_filter: &str,
        limit: usize,
    ) -> papertrader_core::Result<Vec<String>> {
        self.step.set(self.step.get() + 1);
        Ok(self
            .instruments
            .iter()
            .take(limit)
            .map(|(symbol, _)| symbol.clone())
            .collect())
    }

    fn fetch_candles(
        &self,
        symbol: &str,
        _timeframe: &str,
        limit: usize,
    ) -> papertrader_core::Result<Vec<Candle>> {
        let (phase, base) = self
            .instruments
            .iter()
            .enumerate()
            .find(|(_, (s, _))| s == symbol)
            .map(|(i, (_, base))| (i, *base))
            .ok_or_else(|| {
                papertrader_core::Error::ProviderUnavailable(format!("unknown symbol {symbol}"))
            })?;

        let now = chrono::Utc::now();
        let step = self.step.get();
        let candles = (0..limit as i64)
            .map(|i| {
                let at = step - limit as i64 + 1 + i;
                let close = self.close_at(base, phase, at);
                let open = self.close_at(base, phase, at - 1);
                let ts = now - chrono::Duration::minutes(limit as i64 - i);
                Candle::new(ts, open, open.max(close), open.min(close), close, 1_000.0)
            })
            .collect();

        Ok(candles)
    }
}

/// Prints each executed trade as a JSON line; progress goes to the log.
#[derive(Default)]
struct ConsoleSink;

impl DisplaySink for ConsoleSink {
    fn on_status(&mut self, message: &str) {
        tracing::debug!(message, "status");
    }

    fn on_trade(&mut self, record: &TradeRecord) {
        if let Ok(line) = serde_json::to_string(record) {
            println!("{line}");
        }
    }

    fn on_cycle_metrics(&mut self, metrics: &CycleMetrics) {
        tracing::debug!(
            cash = metrics.cash,
            total_value = metrics.total_value,
            open_positions = metrics.open_positions,
            "cycle metrics"
        );
    }
}
