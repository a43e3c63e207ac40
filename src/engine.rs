//! Trading cycle controller.
//!
//! One [`TradingEngine::run_cycle`] call is a single scan over the ranked
//! instrument list: evaluate the strategy per instrument, open a position
//! on a bullish signal, close on a bearish signal or when the profit
//! target is hit. Instruments are taken strictly in the provider's rank
//! order and, with `stop_after_first_trade` set, the first eligible action
//! ends the scan.

use crate::config::EngineConfig;
use crate::ledger::{Ledger, PortfolioSnapshot};
use crate::provider::MarketDataProvider;
use crate::signal::{Evaluation, Signal, SmaMomentum, Strategy};
use crate::sink::DisplaySink;
use crate::trade_log::TradeLog;
use crate::types::CycleMetrics;
use crate::Result;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Summary of one evaluation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Instruments evaluated this pass; fewer than the ranking length
    /// when `stop_after_first_trade` ends the scan early
    pub scanned: usize,
    /// Trades executed during the pass
    pub trades_executed: usize,
}

/// Orchestrates evaluation cycles against a ledger and trade log.
///
/// Prices observed while scanning are kept as the valuation source for
/// [`TradingEngine::snapshot`] and the cycle metrics; the engine never
/// refetches data just for display.
pub struct TradingEngine {
    config: EngineConfig,
    ledger: Ledger,
    trade_log: TradeLog,
    strategy: Box<dyn Strategy>,
    observed_prices: HashMap<String, f64>,
}

impl TradingEngine {
    /// Create an engine with the built-in SMA momentum strategy.
    ///
    /// Fails fast with [`crate::Error::InvalidConfiguration`] on a bad
    /// config; nothing is recoverable about starting misconfigured.
    pub fn new(config: EngineConfig) -> Result<Self> {
        let strategy = Box::new(SmaMomentum::new(config.sma_window));
        Self::with_strategy(config, strategy)
    }

    /// Create an engine with a custom trading rule.
    pub fn with_strategy(config: EngineConfig, strategy: Box<dyn Strategy>) -> Result<Self> {
        config.validate()?;
        let ledger = Ledger::new(config.starting_capital, config.max_positions);
        Ok(Self {
            config,
            ledger,
            trade_log: TradeLog::new(),
            strategy,
            observed_prices: HashMap::new(),
        })
    }

    /// Run one evaluation pass.
    ///
    /// Single-instrument failures (fetch errors, short histories, rejected
    /// ledger operations) are logged and skipped; they never abort the
    /// scan of the remaining instruments.
    pub fn run_cycle(
        &mut self,
        provider: &dyn MarketDataProvider,
        sink: &mut dyn DisplaySink,
    ) -> CycleReport {
        sink.on_status("scanning market");

        let symbols = self.ranked_symbols(provider);
        let mut report = CycleReport::default();

        for symbol in &symbols {
            report.scanned += 1;
            sink.on_status(&format!("checking {symbol}"));
            debug!(%symbol, strategy = self.strategy.name(), "scanning instrument");

            let candles =
                match provider.fetch_candles(symbol, &self.config.timeframe, self.config.candle_limit)
                {
                    Ok(candles) if !candles.is_empty() => candles,
                    Ok(_) => {
                        debug!(%symbol, "no candle data, skipping");
                        continue;
                    }
                    Err(err) => {
                        warn!(%symbol, error = %err, "candle fetch failed, skipping");
                        continue;
                    }
                };

            let evaluation = match self.strategy.evaluate(&candles) {
                Ok(evaluation) => evaluation,
                Err(err) => {
                    debug!(%symbol, error = %err, "skipping instrument");
                    continue;
                }
            };

            self.observed_prices
                .insert(symbol.to_uppercase(), evaluation.current_price);

            let acted = if self.ledger.holds(symbol) {
                self.try_exit(symbol, &evaluation, sink)
            } else {
                self.try_entry(symbol, &evaluation, sink)
            };

            if acted {
                report.trades_executed += 1;
                if self.config.stop_after_first_trade {
                    break;
                }
            }
        }

        let metrics = self.metrics();
        sink.on_status("cycle complete");
        sink.on_cycle_metrics(&metrics);
        info!(
            scanned = report.scanned,
            trades = report.trades_executed,
            cash = metrics.cash,
            total_value = metrics.total_value,
            open_positions = metrics.open_positions,
            "cycle complete"
        );

        report
    }

    /// Ranked instruments for this pass, or the fallback watchlist when
    /// the provider fails or returns nothing.
    fn ranked_symbols(&self, provider: &dyn MarketDataProvider) -> Vec<String> {
        match provider.rank_instruments(&self.config.quote_filter, self.config.rank_limit) {
            Ok(symbols) if !symbols.is_empty() => symbols,
            Ok(_) => {
                warn!("ranking returned no instruments, using fallback watchlist");
                self.config.fallback_watchlist.clone()
            }
            Err(err) => {
                warn!(error = %err, "instrument ranking failed, using fallback watchlist");
                self.config.fallback_watchlist.clone()
            }
        }
    }

    /// Entry rule: flat on the instrument, room under the position cap,
    /// and a bullish signal. Position size is the fixed per-slot
    /// allocation converted to quantity at the current price.
    fn try_entry(&mut self, symbol: &str, evaluation: &Evaluation, sink: &mut dyn DisplaySink) -> bool {
        if evaluation.signal != Signal::Bullish {
            return false;
        }
        if self.ledger.open_count() >= self.config.max_positions {
            return false;
        }
        if evaluation.current_price <= 0.0 {
            warn!(%symbol, price = evaluation.current_price, "non-positive price, skipping entry");
            return false;
        }

        let quantity = self.config.allocation_per_slot() / evaluation.current_price;
        match self.ledger.open_position(symbol, quantity, evaluation.current_price) {
            Ok(record) => {
                info!(
                    %symbol,
                    price = record.price,
                    quantity = record.quantity,
                    "bought"
                );
                sink.on_trade(&record);
                self.trade_log.append(record);
                true
            }
            Err(err) => {
                warn!(%symbol, error = %err, "entry rejected");
                false
            }
        }
    }

    /// Exit rule: bearish signal, or price above the profit target
    /// relative to the entry price.
    fn try_exit(&mut self, symbol: &str, evaluation: &Evaluation, sink: &mut dyn DisplaySink) -> bool {
        let target_price = match self.ledger.position(symbol) {
            Some(position) => position.avg_entry_price * (1.0 + self.config.profit_target_pct),
            None => return false,
        };

        let should_exit =
            evaluation.signal == Signal::Bearish || evaluation.current_price > target_price;
        if !should_exit {
            return false;
        }

        match self.ledger.close_position(symbol, evaluation.current_price) {
            Ok(record) => {
                info!(
                    %symbol,
                    price = record.price,
                    quantity = record.quantity,
                    pnl = record.pnl,
                    "sold"
                );
                sink.on_trade(&record);
                self.trade_log.append(record);
                true
            }
            Err(err) => {
                warn!(%symbol, error = %err, "exit rejected");
                false
            }
        }
    }

    /// Portfolio valuation against prices observed during scanning.
    pub fn snapshot(&self) -> PortfolioSnapshot {
        self.ledger.snapshot(&self.observed_prices)
    }

    /// Per-cycle summary for the display sink.
    pub fn metrics(&self) -> CycleMetrics {
        let snapshot = self.snapshot();
        CycleMetrics {
            cash: snapshot.cash,
            positions_value: snapshot.positions_value,
            total_value: snapshot.total_value,
            total_pnl: snapshot.total_value - self.ledger.starting_capital(),
            open_positions: self.ledger.open_count(),
        }
    }

    /// The portfolio ledger.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// The append-only trade history.
    pub fn trade_log(&self) -> &TradeLog {
        &self.trade_log
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Restore starting capital and clear positions, trade history, and
    /// observed prices.
    pub fn reset(&mut self) {
        self.ledger.reset();
        self.trade_log = TradeLog::new();
        self.observed_prices.clear();
    }
}
