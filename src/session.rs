//! Session runner: drives repeated evaluation cycles.
//!
//! Cycles run strictly one after another. The stop flag is polled at
//! cycle boundaries only; a stop request never interrupts a cycle in
//! flight, so ledger mutations and data fetches always complete.

use crate::engine::TradingEngine;
use crate::provider::MarketDataProvider;
use crate::sink::DisplaySink;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::info;

/// Handle for stopping a running session from another thread.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    running: Arc<AtomicBool>,
}

impl SessionHandle {
    /// Request a cooperative stop. Takes effect before the next cycle.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Whether the session is still running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// Drives an engine through repeated cycles with an inter-cycle delay.
pub struct SessionRunner {
    engine: TradingEngine,
    interval: Duration,
    max_cycles: Option<u64>,
    running: Arc<AtomicBool>,
}

impl SessionRunner {
    /// Create a runner; the delay comes from the engine configuration.
    pub fn new(engine: TradingEngine) -> Self {
        let interval = engine.config().cycle_interval();
        Self {
            engine,
            interval,
            max_cycles: None,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Override the inter-cycle delay.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Bound the number of cycles. Unbounded by default.
    pub fn with_max_cycles(mut self, max_cycles: u64) -> Self {
        self.max_cycles = Some(max_cycles);
        self
    }

    /// Handle for stopping the session from another thread.
    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            running: Arc::clone(&self.running),
        }
    }

    /// Run cycles until stopped or the cycle bound is reached.
    ///
    /// Returns the number of cycles completed. Blocks the calling thread;
    /// the inter-cycle sleep is pacing, not a correctness requirement.
    pub fn run(&mut self, provider: &dyn MarketDataProvider, sink: &mut dyn DisplaySink) -> u64 {
        self.running.store(true, Ordering::SeqCst);
        info!(interval_ms = self.interval.as_millis() as u64, "session started");

        let mut cycles = 0u64;
        loop {
            if !self.running.load(Ordering::SeqCst) {
                break;
            }
            if let Some(max) = self.max_cycles {
                if cycles >= max {
                    break;
                }
            }

            self.engine.run_cycle(provider, sink);
            cycles += 1;

            // Sleep only if another cycle can actually follow.
            let more_allowed = self.max_cycles.map_or(true, |max| cycles < max);
            if more_allowed && self.running.load(Ordering::SeqCst) && !self.interval.is_zero() {
                thread::sleep(self.interval);
            }
        }

        self.running.store(false, Ordering::SeqCst);
        info!(cycles, "session stopped");
        cycles
    }

    /// The engine being driven.
    pub fn engine(&self) -> &TradingEngine {
        &self.engine
    }

    /// Consume the runner and recover the engine.
    pub fn into_engine(self) -> TradingEngine {
        self.engine
    }
}
