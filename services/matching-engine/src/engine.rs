//! Matching engine core
//!
//! Owns the two book sides, assigns order ids, runs the matching loop, and
//! maintains the running statistics. One instance serves exactly one
//! instrument; multi-instrument deployments run independent instances.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use types::errors::OrderError;
use types::event::ExecutionEvent;
use types::ids::OrderId;
use types::numeric::{Price, Volume};
use types::order::{Order, Side};

use crate::book::{AskBook, BidBook};
use crate::config::EngineConfig;
use crate::matching::crossing;
use crate::stats::EngineStats;

/// Single-instrument matching engine.
///
/// Methods take `&mut self`; concurrent callers go through
/// [`crate::shared::SharedEngine`], which serializes them under one lock.
#[derive(Debug, Default)]
pub struct MatchingEngine {
    /// Id of the most recently accepted order; incremented before each
    /// assignment, so ids start at 1 and are never reused
    last_order_id: u64,
    bids: BidBook,
    asks: AskBook,
    stats: EngineStats,
    config: EngineConfig,
}

/// Aggregated top-of-book view for the strategy collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSnapshot {
    /// Best bid levels, highest price first
    pub bids: Vec<(Price, Volume)>,
    /// Best ask levels, lowest price first
    pub asks: Vec<(Price, Volume)>,
}

impl MatchingEngine {
    /// Create an engine with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with an explicit configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Submit a sell order.
    ///
    /// Returns the ordered event sequence: the `NewSell` acknowledgement
    /// followed by one pair of fill events per match, resting order first.
    pub fn submit_ask(
        &mut self,
        price: Price,
        volume: Volume,
        time: i64,
    ) -> Result<Vec<ExecutionEvent>, OrderError> {
        self.validate(price, volume)?;

        self.last_order_id += 1;
        let order = Order::new(OrderId::new(self.last_order_id), time, price, volume);
        self.stats.record_ask_submitted(volume);

        debug!(order_id = %order.id, price = %price, volume = %volume, time, "Ask accepted");

        let mut events = vec![ExecutionEvent::ack(Side::SELL, &order)];
        self.match_ask(order, &mut events);
        Ok(events)
    }

    /// Submit a buy order. Mirror of [`Self::submit_ask`].
    pub fn submit_bid(
        &mut self,
        price: Price,
        volume: Volume,
        time: i64,
    ) -> Result<Vec<ExecutionEvent>, OrderError> {
        self.validate(price, volume)?;

        self.last_order_id += 1;
        let order = Order::new(OrderId::new(self.last_order_id), time, price, volume);
        self.stats.record_bid_submitted(volume);

        debug!(order_id = %order.id, price = %price, volume = %volume, time, "Bid accepted");

        let mut events = vec![ExecutionEvent::ack(Side::BUY, &order)];
        self.match_bid(order, &mut events);
        Ok(events)
    }

    /// Reject invalid submissions before an id is assigned or anything
    /// mutates.
    fn validate(&self, price: Price, volume: Volume) -> Result<(), OrderError> {
        if volume.is_zero() {
            return Err(OrderError::InvalidVolume(
                "volume must be positive".to_string(),
            ));
        }
        if price == self.config.market_price_sentinel {
            return Err(OrderError::UnpricedMarketOrder);
        }
        if price.is_negative() {
            return Err(OrderError::InvalidPrice(format!("negative price {}", price)));
        }
        Ok(())
    }

    /// Match an incoming ask against the bid book.
    ///
    /// Each iteration consumes or reduces exactly one resting order. The
    /// aggressor is inserted into the ask book at most once, only when no
    /// further crossing is possible.
    fn match_ask(&mut self, mut taker: Order, events: &mut Vec<ExecutionEvent>) {
        loop {
            let top = match self.bids.peek_best() {
                Some(order) => *order,
                None => {
                    self.asks.upsert(taker);
                    return;
                }
            };

            if !crossing::can_match(top.price, taker.price) {
                self.asks.upsert(taker);
                return;
            }

            if taker.volume < top.volume {
                // Resting bid survives with reduced volume; aggressor is done
                let fill = taker.volume;
                self.stats.record_match(fill, top.price);
                self.bids.reduce_best(fill);
                trace!(resting_id = %top.id, aggressor_id = %taker.id, price = %top.price, volume = %fill, "Partial fill of resting bid");
                events.push(ExecutionEvent::partial_fill(&top, top.price, fill));
                events.push(ExecutionEvent::full_fill(&taker, top.price, fill));
                return;
            }

            if taker.volume == top.volume {
                // Both sides fully consumed
                let fill = taker.volume;
                self.stats.record_match(fill, top.price);
                self.bids.pop_best();
                trace!(resting_id = %top.id, aggressor_id = %taker.id, price = %top.price, volume = %fill, "Full fill of both orders");
                events.push(ExecutionEvent::full_fill(&top, top.price, fill));
                events.push(ExecutionEvent::full_fill(&taker, top.price, fill));
                return;
            }

            // Resting bid fully consumed; aggressor continues with remainder
            let fill = top.volume;
            self.stats.record_match(fill, top.price);
            self.bids.pop_best();
            trace!(resting_id = %top.id, aggressor_id = %taker.id, price = %top.price, volume = %fill, "Full fill of resting bid");
            events.push(ExecutionEvent::full_fill(&top, top.price, fill));
            events.push(ExecutionEvent::partial_fill(&taker, top.price, fill));
            taker.reduce(fill);
        }
    }

    /// Match an incoming bid against the ask book. Mirror of
    /// [`Self::match_ask`].
    fn match_bid(&mut self, mut taker: Order, events: &mut Vec<ExecutionEvent>) {
        loop {
            let top = match self.asks.peek_best() {
                Some(order) => *order,
                None => {
                    self.bids.upsert(taker);
                    return;
                }
            };

            if !crossing::can_match(taker.price, top.price) {
                self.bids.upsert(taker);
                return;
            }

            if taker.volume < top.volume {
                let fill = taker.volume;
                self.stats.record_match(fill, top.price);
                self.asks.reduce_best(fill);
                trace!(resting_id = %top.id, aggressor_id = %taker.id, price = %top.price, volume = %fill, "Partial fill of resting ask");
                events.push(ExecutionEvent::partial_fill(&top, top.price, fill));
                events.push(ExecutionEvent::full_fill(&taker, top.price, fill));
                return;
            }

            if taker.volume == top.volume {
                let fill = taker.volume;
                self.stats.record_match(fill, top.price);
                self.asks.pop_best();
                trace!(resting_id = %top.id, aggressor_id = %taker.id, price = %top.price, volume = %fill, "Full fill of both orders");
                events.push(ExecutionEvent::full_fill(&top, top.price, fill));
                events.push(ExecutionEvent::full_fill(&taker, top.price, fill));
                return;
            }

            let fill = top.volume;
            self.stats.record_match(fill, top.price);
            self.asks.pop_best();
            trace!(resting_id = %top.id, aggressor_id = %taker.id, price = %top.price, volume = %fill, "Full fill of resting ask");
            events.push(ExecutionEvent::full_fill(&top, top.price, fill));
            events.push(ExecutionEvent::partial_fill(&taker, top.price, fill));
            taker.reduce(fill);
        }
    }

    /// Apply an exogenous correction to a resting order's volume.
    ///
    /// `delta_volume` is subtracted; a result at or below zero removes the
    /// order. No events are emitted: corrections are out-of-band
    /// adjustments, not trades. Returns false if the id is in neither book.
    pub fn modify_order(&mut self, order_id: OrderId, delta_volume: i64) -> bool {
        if let Some(order) = self.bids.get(order_id).copied() {
            let remaining = i128::from(order.volume.as_u64()) - i128::from(delta_volume);
            if remaining > 0 {
                let clamped = remaining.min(i128::from(u64::MAX)) as u64;
                self.bids.update_volume(order_id, Volume::new(clamped));
            } else {
                self.bids.remove(order_id);
            }
            debug!(order_id = %order_id, delta_volume, "Bid corrected");
            return true;
        }

        if let Some(order) = self.asks.get(order_id).copied() {
            let remaining = i128::from(order.volume.as_u64()) - i128::from(delta_volume);
            if remaining > 0 {
                let clamped = remaining.min(i128::from(u64::MAX)) as u64;
                self.asks.update_volume(order_id, Volume::new(clamped));
            } else {
                self.asks.remove(order_id);
            }
            debug!(order_id = %order_id, delta_volume, "Ask corrected");
            return true;
        }

        false
    }

    /// Cancel a resting order. Returns false if the id is in neither book.
    pub fn cancel_order(&mut self, order_id: OrderId) -> bool {
        let canceled = self.bids.remove(order_id) || self.asks.remove(order_id);
        if canceled {
            debug!(order_id = %order_id, "Order canceled");
        }
        canceled
    }

    /// Look up a resting order on either side.
    pub fn get_order(&self, order_id: OrderId) -> Option<&Order> {
        self.bids.get(order_id).or_else(|| self.asks.get(order_id))
    }

    /// Check whether an order is resting on either side.
    pub fn contains(&self, order_id: OrderId) -> bool {
        self.bids.contains(order_id) || self.asks.contains(order_id)
    }

    // Statistics accessors

    pub fn match_count(&self) -> u64 {
        self.stats.match_count()
    }

    pub fn matched_sell_volume(&self) -> u64 {
        self.stats.matched_sell_volume()
    }

    pub fn matched_buy_notional(&self) -> Decimal {
        self.stats.matched_buy_notional()
    }

    pub fn gross_ask_volume(&self) -> u64 {
        self.stats.gross_ask_volume()
    }

    pub fn gross_bid_volume(&self) -> u64 {
        self.stats.gross_bid_volume()
    }

    /// All counters at once, for monitoring exports.
    pub fn stats(&self) -> &EngineStats {
        &self.stats
    }

    // Market observation accessors

    pub fn best_bid(&self) -> Option<Price> {
        self.bids.best_bid_price()
    }

    pub fn best_ask(&self) -> Option<Price> {
        self.asks.best_ask_price()
    }

    /// Best-ask minus best-bid, when both sides are populated.
    pub fn spread(&self) -> Option<Decimal> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask.as_decimal() - bid.as_decimal()),
            _ => None,
        }
    }

    /// Number of resting bid orders.
    pub fn bid_depth(&self) -> usize {
        self.bids.order_count()
    }

    /// Number of resting ask orders.
    pub fn ask_depth(&self) -> usize {
        self.asks.order_count()
    }

    /// Total resting orders across both sides.
    pub fn order_count(&self) -> usize {
        self.bid_depth() + self.ask_depth()
    }

    /// Top-N levels of both sides.
    pub fn snapshot(&self, depth: usize) -> BookSnapshot {
        BookSnapshot {
            bids: self.bids.depth_snapshot(depth),
            asks: self.asks.depth_snapshot(depth),
        }
    }

    /// Id of the most recently assigned order, 0 if none yet.
    pub fn last_order_id(&self) -> u64 {
        self.last_order_id
    }

    /// Align the id counter so the next accepted submission is assigned
    /// `next`. Used when resuming mid-stream behind an external feed.
    pub fn set_next_order_id(&mut self, next: u64) {
        self.last_order_id = next.saturating_sub(1);
    }
}
