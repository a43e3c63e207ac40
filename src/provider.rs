//! Market data provider interface.

use crate::types::Candle;
use crate::Result;

/// Upstream source of ranked instruments and candle history.
///
/// Implementations are synchronous; timeout policy belongs to the
/// implementation, not the engine. Both calls are best-effort: the engine
/// recovers from errors and empty results locally (fallback watchlist for
/// ranking, skip-instrument for candles), so implementations should prefer
/// returning an error over blocking indefinitely.
pub trait MarketDataProvider {
    /// Rank tradable instruments by traded volume, best first.
    ///
    /// `quote_filter` restricts the universe to pairs quoted in that
    /// currency (e.g. "USDT"); `limit` caps the result length.
    fn rank_instruments(&self, quote_filter: &str, limit: usize) -> Result<Vec<String>>;

    /// Fetch recent candles for one instrument, oldest first.
    fn fetch_candles(&self, symbol: &str, timeframe: &str, limit: usize) -> Result<Vec<Candle>>;
}
