//! Display sink interface.

use crate::types::{CycleMetrics, TradeRecord};

/// Receiver for engine events: scanning status, executed trades, and the
/// per-cycle portfolio summary. The engine never depends on how (or
/// whether) these are rendered; all methods default to no-ops.
pub trait DisplaySink {
    /// Ephemeral scanning/progress text.
    fn on_status(&mut self, _message: &str) {}

    /// Fired exactly once per executed buy or sell.
    fn on_trade(&mut self, _record: &TradeRecord) {}

    /// Portfolio summary emitted at the end of every cycle.
    fn on_cycle_metrics(&mut self, _metrics: &CycleMetrics) {}
}

/// Sink that discards every event, for headless use and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DisplaySink for NullSink {}
