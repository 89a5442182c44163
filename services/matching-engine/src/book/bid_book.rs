//! Bid (buy-side) order book
//!
//! Maintains buy orders sorted by price descending (best bid first).
//! Uses BTreeMap for deterministic iteration order, plus an id locator map
//! so cancel and correction paths find an order without walking the levels.

use std::collections::{BTreeMap, HashMap};
use types::ids::OrderId;
use types::numeric::{Price, Volume};
use types::order::Order;

use super::price_level::PriceLevel;

/// Bid (buy) side order book
///
/// Orders are sorted by price descending, so the highest bid is first.
/// At each price level, orders are maintained in FIFO order. Empty price
/// levels are removed eagerly, so every stored level holds at least one
/// order with positive volume.
#[derive(Debug, Clone)]
pub struct BidBook {
    /// Price levels; BTreeMap iteration is ascending, best bid is last
    levels: BTreeMap<Price, PriceLevel>,
    /// Locator from order id to the price level holding it
    index: HashMap<OrderId, Price>,
}

impl BidBook {
    /// Create a new empty bid book
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
            index: HashMap::new(),
        }
    }

    /// Insert a new order, or replace the stored order for an existing id
    ///
    /// A replacement at the same price updates the volume in place so the
    /// order keeps its queue position; writing back a reduced resting order
    /// must not forfeit its time priority. A replacement at a different
    /// price re-enqueues at the back of the new level.
    pub fn upsert(&mut self, order: Order) {
        if let Some(prev_price) = self.index.get(&order.id).copied() {
            if prev_price == order.price {
                let level = self
                    .levels
                    .get_mut(&prev_price)
                    .expect("order locator points at a missing price level");
                let updated = level.update_volume(order.id, order.volume);
                assert!(updated, "order locator points at a missing order");
                return;
            }
            self.remove(order.id);
        }

        self.index.insert(order.id, order.price);
        self.levels
            .entry(order.price)
            .or_insert_with(PriceLevel::new)
            .insert(order);
    }

    /// Get the best-priority order (highest price, earliest arrival)
    pub fn peek_best(&self) -> Option<&Order> {
        self.levels
            .iter()
            .next_back()
            .and_then(|(_, level)| level.peek_front())
    }

    /// Remove and return the best-priority order
    ///
    /// # Panics
    /// Panics if the book is empty; callers check before consuming
    pub fn pop_best(&mut self) -> Order {
        let price = match self.levels.keys().next_back().copied() {
            Some(price) => price,
            None => panic!("pop_best called on an empty bid book"),
        };

        let level = self
            .levels
            .get_mut(&price)
            .expect("best price level missing");
        let order = level
            .pop_front()
            .expect("empty price level left in the book");

        if level.is_empty() {
            self.levels.remove(&price);
        }
        self.index.remove(&order.id);
        order
    }

    /// Reduce the best-priority order's volume in place
    ///
    /// # Panics
    /// Panics if the book is empty or the reduction would not leave the
    /// order with positive volume
    pub fn reduce_best(&mut self, by: Volume) {
        let (_, level) = self
            .levels
            .iter_mut()
            .next_back()
            .expect("reduce_best called on an empty bid book");
        let front = level
            .peek_front()
            .copied()
            .expect("empty price level left in the book");

        assert!(
            by < front.volume,
            "partial fill must leave the resting order with positive volume"
        );
        level.update_front_volume(front.volume - by);
    }

    /// Remove an order from the bid book
    ///
    /// Returns true if the order was found and removed
    pub fn remove(&mut self, order_id: OrderId) -> bool {
        let price = match self.index.remove(&order_id) {
            Some(price) => price,
            None => return false,
        };

        let level = self
            .levels
            .get_mut(&price)
            .expect("order locator points at a missing price level");
        let removed = level.remove(order_id);
        assert!(removed.is_some(), "order locator points at a missing order");

        // Remove empty price levels to keep the book clean
        if level.is_empty() {
            self.levels.remove(&price);
        }
        true
    }

    /// Update an order's volume in place, preserving queue position
    ///
    /// Returns false if the id is unknown
    pub fn update_volume(&mut self, order_id: OrderId, new_volume: Volume) -> bool {
        let price = match self.index.get(&order_id).copied() {
            Some(price) => price,
            None => return false,
        };

        let level = self
            .levels
            .get_mut(&price)
            .expect("order locator points at a missing price level");
        level.update_volume(order_id, new_volume)
    }

    /// Look up an order by id
    pub fn get(&self, order_id: OrderId) -> Option<&Order> {
        let price = self.index.get(&order_id)?;
        self.levels.get(price)?.get(order_id)
    }

    /// Check whether an order id is resident in this book
    pub fn contains(&self, order_id: OrderId) -> bool {
        self.index.contains_key(&order_id)
    }

    /// Get the best bid (highest price) and the volume resting there
    pub fn best_bid(&self) -> Option<(Price, Volume)> {
        // BTreeMap iter is ascending, so we need last()
        self.levels
            .iter()
            .next_back()
            .map(|(price, level)| (*price, level.total_volume()))
    }

    /// Get the best bid price
    pub fn best_bid_price(&self) -> Option<Price> {
        self.levels.keys().next_back().copied()
    }

    /// Get depth snapshot (top N price levels)
    pub fn depth_snapshot(&self, depth: usize) -> Vec<(Price, Volume)> {
        self.levels
            .iter()
            .rev() // Reverse to get highest prices first
            .take(depth)
            .map(|(price, level)| (*price, level.total_volume()))
            .collect()
    }

    /// Check if the bid book is empty
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Get the number of resting orders
    pub fn order_count(&self) -> usize {
        self.index.len()
    }

    /// Get the total number of price levels
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }
}

impl Default for BidBook {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_order(id: u64, price: u64, volume: u64) -> Order {
        Order::new(OrderId::new(id), id as i64, Price::from_u64(price), Volume::new(volume))
    }

    #[test]
    fn test_bid_book_upsert() {
        let mut book = BidBook::new();

        book.upsert(make_order(1, 50000, 1));

        assert_eq!(book.level_count(), 1);
        assert_eq!(book.order_count(), 1);
        assert!(book.contains(OrderId::new(1)));
        assert!(!book.is_empty());
    }

    #[test]
    fn test_bid_book_best_bid() {
        let mut book = BidBook::new();

        book.upsert(make_order(1, 50000, 1));
        book.upsert(make_order(2, 51000, 2)); // Higher price
        book.upsert(make_order(3, 49000, 3)); // Lower price

        let (best_price, best_volume) = book.best_bid().unwrap();
        assert_eq!(best_price, Price::from_u64(51000)); // Highest price
        assert_eq!(best_volume, Volume::new(2));

        let best = book.peek_best().unwrap();
        assert_eq!(best.id, OrderId::new(2));
    }

    #[test]
    fn test_bid_book_pop_best_follows_price_time_priority() {
        let mut book = BidBook::new();

        book.upsert(make_order(1, 50000, 1));
        book.upsert(make_order(2, 51000, 2));
        book.upsert(make_order(3, 51000, 3)); // Same price, later arrival

        assert_eq!(book.pop_best().id, OrderId::new(2)); // Best price, first in
        assert_eq!(book.pop_best().id, OrderId::new(3)); // Best price, second in
        assert_eq!(book.pop_best().id, OrderId::new(1));
        assert!(book.is_empty());
    }

    #[test]
    #[should_panic(expected = "pop_best called on an empty bid book")]
    fn test_bid_book_pop_best_empty_panics() {
        let mut book = BidBook::new();
        book.pop_best();
    }

    #[test]
    fn test_bid_book_reduce_best() {
        let mut book = BidBook::new();

        book.upsert(make_order(1, 50000, 5));
        book.reduce_best(Volume::new(2));

        let best = book.peek_best().unwrap();
        assert_eq!(best.id, OrderId::new(1));
        assert_eq!(best.volume, Volume::new(3));
        assert_eq!(book.best_bid().unwrap().1, Volume::new(3));
    }

    #[test]
    fn test_bid_book_remove() {
        let mut book = BidBook::new();

        book.upsert(make_order(1, 50000, 1));
        assert_eq!(book.level_count(), 1);

        assert!(book.remove(OrderId::new(1)));
        assert!(book.is_empty());
        assert!(!book.contains(OrderId::new(1)));

        assert!(!book.remove(OrderId::new(1)));
    }

    #[test]
    fn test_bid_book_upsert_in_place_keeps_priority() {
        let mut book = BidBook::new();

        book.upsert(make_order(1, 50000, 5));
        book.upsert(make_order(2, 50000, 4));

        // Write back order 1 with reduced volume at the same price
        book.upsert(make_order(1, 50000, 2));

        // Order 1 is still ahead of order 2 in the queue
        assert_eq!(book.peek_best().unwrap().id, OrderId::new(1));
        assert_eq!(book.peek_best().unwrap().volume, Volume::new(2));
        assert_eq!(book.order_count(), 2);
    }

    #[test]
    fn test_bid_book_depth_snapshot() {
        let mut book = BidBook::new();

        book.upsert(make_order(1, 50000, 1));
        book.upsert(make_order(2, 51000, 2));
        book.upsert(make_order(3, 49000, 3));
        book.upsert(make_order(4, 52000, 4));

        let depth = book.depth_snapshot(2);

        // Should return top 2 levels (highest prices first)
        assert_eq!(depth.len(), 2);
        assert_eq!(depth[0], (Price::from_u64(52000), Volume::new(4)));
        assert_eq!(depth[1], (Price::from_u64(51000), Volume::new(2)));
    }

    #[test]
    fn test_bid_book_get_and_update_volume() {
        let mut book = BidBook::new();

        book.upsert(make_order(1, 50000, 5));

        assert_eq!(book.get(OrderId::new(1)).unwrap().volume, Volume::new(5));
        assert!(book.get(OrderId::new(9)).is_none());

        assert!(book.update_volume(OrderId::new(1), Volume::new(2)));
        assert_eq!(book.get(OrderId::new(1)).unwrap().volume, Volume::new(2));

        assert!(!book.update_volume(OrderId::new(9), Volume::new(2)));
    }
}
