//! Engine configuration and validation.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a trading session.
///
/// Defaults mirror the original session parameters: one million starting
/// capital spread over at most four positions, scanning once every five
/// seconds on one-minute candles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Virtual capital at session start
    pub starting_capital: f64,
    /// Maximum simultaneous open positions (diversification cap)
    pub max_positions: usize,
    /// Delay between cycles, in seconds
    pub cycle_interval_seconds: u64,
    /// Window for the momentum moving average
    pub sma_window: usize,
    /// Take-profit threshold relative to entry price (0.001 = 0.1%)
    pub profit_target_pct: f64,
    /// End the scan as soon as one trade executes
    pub stop_after_first_trade: bool,
    /// Instruments scanned when ranking fails or comes back empty
    pub fallback_watchlist: Vec<String>,
    /// Quote currency filter passed to the provider's ranking call
    pub quote_filter: String,
    /// How many ranked instruments to scan per cycle
    pub rank_limit: usize,
    /// Candle timeframe requested from the provider
    pub timeframe: String,
    /// Candles requested per instrument
    pub candle_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            starting_capital: 1_000_000.0,
            max_positions: 4,
            cycle_interval_seconds: 5,
            sma_window: 5,
            profit_target_pct: 0.001,
            stop_after_first_trade: true,
            fallback_watchlist: vec![
                "BTC/USDT".to_string(),
                "ETH/USDT".to_string(),
                "SOL/USDT".to_string(),
                "DOGE/USDT".to_string(),
            ],
            quote_filter: "USDT".to_string(),
            rank_limit: 10,
            timeframe: "1m".to_string(),
            candle_limit: 20,
        }
    }
}

impl EngineConfig {
    /// Validate the configuration. Called once at engine construction;
    /// invalid configuration is fatal, not recoverable.
    pub fn validate(&self) -> Result<()> {
        if self.max_positions == 0 {
            return Err(Error::InvalidConfiguration(
                "max_positions must be at least 1".to_string(),
            ));
        }
        if self.starting_capital <= 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "starting_capital must be positive, got {}",
                self.starting_capital
            )));
        }
        if self.sma_window == 0 {
            return Err(Error::InvalidConfiguration(
                "sma_window must be at least 1".to_string(),
            ));
        }
        if self.profit_target_pct < 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "profit_target_pct must not be negative, got {}",
                self.profit_target_pct
            )));
        }
        if self.candle_limit < self.sma_window {
            return Err(Error::InvalidConfiguration(format!(
                "candle_limit ({}) is smaller than sma_window ({})",
                self.candle_limit, self.sma_window
            )));
        }
        Ok(())
    }

    /// Capital allocated to each new position: starting capital divided
    /// evenly across the position cap.
    pub fn allocation_per_slot(&self) -> f64 {
        self.starting_capital / self.max_positions as f64
    }

    /// Inter-cycle delay as a [`Duration`].
    pub fn cycle_interval(&self) -> Duration {
        Duration::from_secs(self.cycle_interval_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.starting_capital, 1_000_000.0);
        assert_eq!(config.max_positions, 4);
        assert_eq!(config.fallback_watchlist.len(), 4);
    }

    #[test]
    fn test_allocation_per_slot() {
        let config = EngineConfig::default();
        assert_eq!(config.allocation_per_slot(), 250_000.0);
    }

    #[test]
    fn test_zero_max_positions_rejected() {
        let config = EngineConfig {
            max_positions: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_negative_capital_rejected() {
        let config = EngineConfig {
            starting_capital: -5.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_zero_window_rejected() {
        let config = EngineConfig {
            sma_window: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_candle_limit_must_cover_window() {
        let config = EngineConfig {
            sma_window: 30,
            candle_limit: 20,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"max_positions": 2, "sma_window": 3}"#).unwrap();
        assert_eq!(config.max_positions, 2);
        assert_eq!(config.sma_window, 3);
        // Remaining fields fall back to defaults
        assert_eq!(config.starting_capital, 1_000_000.0);
        assert_eq!(config.allocation_per_slot(), 500_000.0);
    }
}
