//! Core data types for the paper trading engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One time-bucketed price sample, oldest-first in any sequence.
///
/// Candles are produced by the market data provider and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Open time of the bucket
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    /// Create a new candle.
    pub fn new(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// Trade direction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

/// An executed simulated trade. Immutable once appended to the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// When the trade was executed
    pub executed_at: DateTime<Utc>,
    /// Instrument identifier (uppercase)
    pub symbol: String,
    /// Buy or Sell
    pub side: TradeSide,
    /// Execution price
    pub price: f64,
    /// Quantity traded
    pub quantity: f64,
    /// Realized P&L. Zero for buys, `quantity * (price - entry)` for sells.
    pub pnl: f64,
}

impl TradeRecord {
    /// Create a buy record. Realized P&L is always zero on entry.
    pub fn buy(symbol: &str, quantity: f64, price: f64) -> Self {
        Self {
            executed_at: Utc::now(),
            symbol: symbol.to_uppercase(),
            side: TradeSide::Buy,
            price,
            quantity,
            pnl: 0.0,
        }
    }

    /// Create a sell record with the realized P&L.
    pub fn sell(symbol: &str, quantity: f64, price: f64, pnl: f64) -> Self {
        Self {
            executed_at: Utc::now(),
            symbol: symbol.to_uppercase(),
            side: TradeSide::Sell,
            price,
            quantity,
            pnl,
        }
    }

    /// Cash moved by this trade.
    pub fn notional(&self) -> f64 {
        self.quantity * self.price
    }
}

/// Per-cycle portfolio summary pushed to the display sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleMetrics {
    /// Cash balance
    pub cash: f64,
    /// Value of open positions at last observed prices
    pub positions_value: f64,
    /// Cash plus positions value
    pub total_value: f64,
    /// Total P&L relative to starting capital
    pub total_pnl: f64,
    /// Number of open positions
    pub open_positions: usize,
}

/// JSON response wrapper used by the CLI and host bridges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response.
    pub fn err(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error.into()),
        }
    }
}
