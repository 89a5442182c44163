//! Running trade statistics
//!
//! Plain counters updated inside the engine's critical section; they only
//! increase and are reset by nothing short of constructing a new engine.

use rust_decimal::Decimal;
use serde::Serialize;
use types::numeric::{Price, Volume};

/// Aggregate counters maintained by the matching engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EngineStats {
    /// Matches performed (one per resting order consumed or reduced)
    match_count: u64,
    /// Total volume traded across all matches
    matched_sell_volume: u64,
    /// Total notional traded (volume times execution price)
    matched_buy_notional: Decimal,
    /// Total ask volume accepted at submission, matched or not
    gross_ask_volume: u64,
    /// Total bid volume accepted at submission, matched or not
    gross_bid_volume: u64,
}

impl EngineStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one match at the given execution price.
    pub fn record_match(&mut self, volume: Volume, price: Price) {
        self.match_count += 1;
        self.matched_sell_volume += volume.as_u64();
        self.matched_buy_notional += Decimal::from(volume.as_u64()) * price.as_decimal();
    }

    /// Record an accepted ask submission.
    pub fn record_ask_submitted(&mut self, volume: Volume) {
        self.gross_ask_volume += volume.as_u64();
    }

    /// Record an accepted bid submission.
    pub fn record_bid_submitted(&mut self, volume: Volume) {
        self.gross_bid_volume += volume.as_u64();
    }

    pub fn match_count(&self) -> u64 {
        self.match_count
    }

    pub fn matched_sell_volume(&self) -> u64 {
        self.matched_sell_volume
    }

    pub fn matched_buy_notional(&self) -> Decimal {
        self.matched_buy_notional
    }

    pub fn gross_ask_volume(&self) -> u64 {
        self.gross_ask_volume
    }

    pub fn gross_bid_volume(&self) -> u64 {
        self.gross_bid_volume
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_start_at_zero() {
        let stats = EngineStats::new();
        assert_eq!(stats.match_count(), 0);
        assert_eq!(stats.matched_sell_volume(), 0);
        assert_eq!(stats.matched_buy_notional(), Decimal::ZERO);
        assert_eq!(stats.gross_ask_volume(), 0);
        assert_eq!(stats.gross_bid_volume(), 0);
    }

    #[test]
    fn test_stats_accumulate_matches() {
        let mut stats = EngineStats::new();

        stats.record_match(Volume::new(4), Price::from_u64(10));
        stats.record_match(Volume::new(3), Price::from_u64(12));

        assert_eq!(stats.match_count(), 2);
        assert_eq!(stats.matched_sell_volume(), 7);
        assert_eq!(stats.matched_buy_notional(), Decimal::from(76)); // 40 + 36
    }

    #[test]
    fn test_stats_notional_uses_decimal_prices() {
        let mut stats = EngineStats::new();

        stats.record_match(Volume::new(3), Price::from_str("10.5").unwrap());

        assert_eq!(
            stats.matched_buy_notional(),
            Decimal::from_str_exact("31.5").unwrap()
        );
    }

    #[test]
    fn test_stats_gross_volumes() {
        let mut stats = EngineStats::new();

        stats.record_ask_submitted(Volume::new(5));
        stats.record_ask_submitted(Volume::new(3));
        stats.record_bid_submitted(Volume::new(4));

        assert_eq!(stats.gross_ask_volume(), 8);
        assert_eq!(stats.gross_bid_volume(), 4);
    }
}
