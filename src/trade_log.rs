//! Append-only log of executed trades.

use crate::types::TradeRecord;

/// Trade history for a session, ordered by append time. Records are never
/// mutated or removed; `recent_first` is a view, not a reordering.
#[derive(Debug, Clone, Default)]
pub struct TradeLog {
    records: Vec<TradeRecord>,
}

impl TradeLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an executed trade.
    pub fn append(&mut self, record: TradeRecord) {
        self.records.push(record);
    }

    /// All trades, oldest first.
    pub fn all(&self) -> &[TradeRecord] {
        &self.records
    }

    /// Trades newest first, for dashboards.
    pub fn recent_first(&self) -> impl Iterator<Item = &TradeRecord> {
        self.records.iter().rev()
    }

    /// The most recent trade, if any.
    pub fn last(&self) -> Option<&TradeRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let mut log = TradeLog::new();
        log.append(TradeRecord::buy("A", 1.0, 10.0));
        log.append(TradeRecord::buy("B", 1.0, 20.0));
        log.append(TradeRecord::sell("A", 1.0, 12.0, 2.0));

        let symbols: Vec<_> = log.all().iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["A", "B", "A"]);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_recent_first_is_a_view() {
        let mut log = TradeLog::new();
        log.append(TradeRecord::buy("A", 1.0, 10.0));
        log.append(TradeRecord::buy("B", 1.0, 20.0));

        let newest: Vec<_> = log.recent_first().map(|r| r.symbol.as_str()).collect();
        assert_eq!(newest, vec!["B", "A"]);

        // Underlying order unchanged
        assert_eq!(log.all()[0].symbol, "A");
    }

    #[test]
    fn test_last_and_empty() {
        let mut log = TradeLog::new();
        assert!(log.is_empty());
        assert!(log.last().is_none());

        log.append(TradeRecord::buy("A", 1.0, 10.0));
        assert_eq!(log.last().unwrap().symbol, "A");
        assert!(!log.is_empty());
    }
}
