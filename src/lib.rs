//! Paper Trader Core - Simulated momentum trading engine.
//!
//! This crate provides the core of a paper trading session:
//!
//! - **Signal evaluation**: SMA momentum signal over candle history
//! - **Portfolio ledger**: cash and position accounting with hard invariants
//! - **Trade log**: append-only record of executed trades
//! - **Cycle controller**: scans ranked instruments and applies entries/exits
//! - **Session runner**: drives repeated cycles with cooperative stop
//!
//! Market data comes in through the [`MarketDataProvider`] trait and trade
//! and status events go out through the [`DisplaySink`] trait, so the engine
//! never depends on a particular exchange client or frontend.
//!
//! # Example
//!
//! ```rust,no_run
//! use papertrader_core::{EngineConfig, NullSink, TradingEngine};
//! # use papertrader_core::{Candle, MarketDataProvider, Result};
//! # struct Demo;
//! # impl MarketDataProvider for Demo {
//! #     fn rank_instruments(&self, _q: &str, _l: usize) -> Result<Vec<String>> { Ok(vec![]) }
//! #     fn fetch_candles(&self, _s: &str, _t: &str, _l: usize) -> Result<Vec<Candle>> { Ok(vec![]) }
//! # }
//!
//! let mut engine = TradingEngine::new(EngineConfig::default()).unwrap();
//! let mut sink = NullSink;
//!
//! let report = engine.run_cycle(&Demo, &mut sink);
//! println!(
//!     "scanned {} instruments, executed {} trades",
//!     report.scanned, report.trades_executed
//! );
//! ```

pub mod config;
pub mod engine;
pub mod indicators;
pub mod ledger;
pub mod provider;
pub mod session;
pub mod signal;
pub mod sink;
pub mod trade_log;
pub mod types;

// Re-export commonly used types
pub use config::EngineConfig;
pub use engine::{CycleReport, TradingEngine};
pub use indicators::sma;
pub use ledger::{Ledger, PortfolioSnapshot, Position};
pub use provider::MarketDataProvider;
pub use session::{SessionHandle, SessionRunner};
pub use signal::{Evaluation, Signal, SmaMomentum, Strategy};
pub use sink::{DisplaySink, NullSink};
pub use trade_log::TradeLog;
pub use types::{ApiResponse, Candle, CycleMetrics, TradeRecord, TradeSide};

/// Error types for papertrader-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("insufficient funds: need {needed:.2}, have {available:.2}")]
    InsufficientFunds { needed: f64, available: f64 },

    #[error("position limit reached: {0} positions open")]
    PositionLimitReached(usize),

    #[error("position already open for {0}")]
    DuplicatePosition(String),

    #[error("no open position for {0}")]
    NoSuchPosition(String),

    #[error("insufficient data: have {have} candles, need {need}")]
    InsufficientData { have: usize, need: usize },

    #[error("market data provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for papertrader-core operations.
pub type Result<T> = std::result::Result<T, Error>;
