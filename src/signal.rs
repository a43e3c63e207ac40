//! Momentum signal evaluation.
//!
//! The [`Strategy`] trait is the single swap point for the trading rule:
//! the cycle controller only ever sees an [`Evaluation`], so a different
//! rule can be dropped in without touching the orchestration around it.

use crate::indicators::sma;
use crate::types::Candle;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Direction of the trading signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Bullish,
    Bearish,
    Neutral,
}

/// Outcome of evaluating a candle history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub signal: Signal,
    /// Close of the most recent candle
    pub current_price: f64,
    /// Mean close over the trailing window
    pub short_average: f64,
}

/// A trading rule: candle history in, signal out.
///
/// Implementations must be pure and deterministic; the same candle
/// sequence always yields the same evaluation.
pub trait Strategy {
    /// Evaluate the candle history, oldest candle first.
    ///
    /// Returns [`Error::InsufficientData`] when the history is too short
    /// for the rule; callers treat that as "skip this instrument".
    fn evaluate(&self, candles: &[Candle]) -> Result<Evaluation>;

    /// Name used in logs.
    fn name(&self) -> &str {
        "strategy"
    }
}

/// SMA momentum rule: bullish while the latest close sits above the
/// trailing moving average, bearish while below, neutral on equality.
#[derive(Debug, Clone)]
pub struct SmaMomentum {
    window: usize,
}

impl SmaMomentum {
    /// Create the rule with the given averaging window.
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    /// The averaging window.
    pub fn window(&self) -> usize {
        self.window
    }
}

impl Default for SmaMomentum {
    fn default() -> Self {
        Self::new(5)
    }
}

impl Strategy for SmaMomentum {
    fn evaluate(&self, candles: &[Candle]) -> Result<Evaluation> {
        if self.window == 0 || candles.len() < self.window {
            return Err(Error::InsufficientData {
                have: candles.len(),
                need: self.window.max(1),
            });
        }

        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        let averages = sma(&closes, self.window);
        let current_price = closes[closes.len() - 1];
        let short_average = averages[closes.len() - 1];

        let signal = if current_price > short_average {
            Signal::Bullish
        } else if current_price < short_average {
            Signal::Bearish
        } else {
            Signal::Neutral
        };

        Ok(Evaluation {
            signal,
            current_price,
            short_average,
        })
    }

    fn name(&self) -> &str {
        "sma_momentum"
    }
}
