//! Portfolio ledger: cash and position accounting.
//!
//! The ledger is the only component with cross-cycle invariants, so it is
//! the single serialization point if an embedding ever goes concurrent.
//! Every successful mutation returns exactly one [`TradeRecord`].

use crate::types::TradeRecord;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An open holding for one instrument. Exists only while quantity > 0;
/// removed entirely on a full sell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Instrument identifier (uppercase)
    pub symbol: String,
    /// Quantity held
    pub quantity: f64,
    /// Average entry price
    pub avg_entry_price: f64,
    /// When the position was opened
    pub opened_at: DateTime<Utc>,
}

impl Position {
    /// Create a new position.
    pub fn new(symbol: &str, quantity: f64, avg_entry_price: f64) -> Self {
        Self {
            symbol: symbol.to_uppercase(),
            quantity,
            avg_entry_price,
            opened_at: Utc::now(),
        }
    }

    /// Value of the position at the given price.
    pub fn notional_at(&self, price: f64) -> f64 {
        self.quantity * price
    }

    /// Unrealized P&L at the given price.
    pub fn unrealized_pnl(&self, price: f64) -> f64 {
        self.quantity * (price - self.avg_entry_price)
    }
}

/// Point-in-time portfolio valuation. Pure read, safe to call repeatedly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    pub cash: f64,
    pub positions_value: f64,
    pub total_value: f64,
    pub unrealized_pnl: f64,
}

/// Cash balance plus open positions, with the session's invariants
/// enforced at every mutation: cash never goes negative, at most one
/// position per instrument, and never more than `max_positions` open.
#[derive(Debug, Clone)]
pub struct Ledger {
    cash: f64,
    positions: HashMap<String, Position>,
    starting_capital: f64,
    max_positions: usize,
}

impl Ledger {
    /// Create a ledger holding the full starting capital in cash.
    pub fn new(starting_capital: f64, max_positions: usize) -> Self {
        Self {
            cash: starting_capital,
            positions: HashMap::new(),
            starting_capital,
            max_positions,
        }
    }

    /// Open a position, debiting cash by `quantity * price`.
    ///
    /// Fails with [`Error::DuplicatePosition`] if the instrument is already
    /// held, [`Error::PositionLimitReached`] at the diversification cap, or
    /// [`Error::InsufficientFunds`] if the cost exceeds cash. The ledger is
    /// untouched on any failure.
    pub fn open_position(&mut self, symbol: &str, quantity: f64, price: f64) -> Result<TradeRecord> {
        let symbol_upper = symbol.to_uppercase();

        if self.positions.contains_key(&symbol_upper) {
            return Err(Error::DuplicatePosition(symbol_upper));
        }
        if self.positions.len() >= self.max_positions {
            return Err(Error::PositionLimitReached(self.positions.len()));
        }

        let cost = quantity * price;
        if cost > self.cash {
            return Err(Error::InsufficientFunds {
                needed: cost,
                available: self.cash,
            });
        }

        self.cash -= cost;
        self.positions
            .insert(symbol_upper.clone(), Position::new(&symbol_upper, quantity, price));

        Ok(TradeRecord::buy(&symbol_upper, quantity, price))
    }

    /// Close the full position, crediting cash by `quantity * price` and
    /// realizing `quantity * (price - avg_entry_price)` as P&L.
    ///
    /// Fails with [`Error::NoSuchPosition`] if the instrument is not held.
    pub fn close_position(&mut self, symbol: &str, price: f64) -> Result<TradeRecord> {
        let symbol_upper = symbol.to_uppercase();

        let position = self
            .positions
            .remove(&symbol_upper)
            .ok_or_else(|| Error::NoSuchPosition(symbol_upper.clone()))?;

        let revenue = position.notional_at(price);
        let pnl = position.unrealized_pnl(price);
        self.cash += revenue;

        Ok(TradeRecord::sell(&symbol_upper, position.quantity, price, pnl))
    }

    /// Value the portfolio against the given prices.
    ///
    /// Positions missing from `current_prices` are valued at their entry
    /// price, a deliberate fallback for provider flakiness; their
    /// unrealized P&L contribution is then zero.
    pub fn snapshot(&self, current_prices: &HashMap<String, f64>) -> PortfolioSnapshot {
        let mut positions_value = 0.0;
        let mut unrealized_pnl = 0.0;

        for position in self.positions.values() {
            let price = current_prices
                .get(&position.symbol)
                .copied()
                .unwrap_or(position.avg_entry_price);
            positions_value += position.notional_at(price);
            unrealized_pnl += position.unrealized_pnl(price);
        }

        PortfolioSnapshot {
            cash: self.cash,
            positions_value,
            total_value: self.cash + positions_value,
            unrealized_pnl,
        }
    }

    /// Restore the starting capital and drop all positions. Explicit only;
    /// the ledger is never reset implicitly.
    pub fn reset(&mut self) {
        self.cash = self.starting_capital;
        self.positions.clear();
    }

    /// Current cash balance.
    pub fn cash(&self) -> f64 {
        self.cash
    }

    /// Capital the session started with.
    pub fn starting_capital(&self) -> f64 {
        self.starting_capital
    }

    /// Number of open positions.
    pub fn open_count(&self) -> usize {
        self.positions.len()
    }

    /// Whether the instrument is currently held.
    pub fn holds(&self, symbol: &str) -> bool {
        self.positions.contains_key(&symbol.to_uppercase())
    }

    /// Look up an open position.
    pub fn position(&self, symbol: &str) -> Option<&Position> {
        self.positions.get(&symbol.to_uppercase())
    }

    /// Iterate over open positions (unordered).
    pub fn positions(&self) -> impl Iterator<Item = &Position> {
        self.positions.values()
    }
}
