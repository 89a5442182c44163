//! Ask (sell-side) order book
//!
//! Maintains sell orders sorted by price ascending (best ask first).
//! Uses BTreeMap for deterministic iteration order, plus an id locator map
//! so cancel and correction paths find an order without walking the levels.

use std::collections::{BTreeMap, HashMap};
use types::ids::OrderId;
use types::numeric::{Price, Volume};
use types::order::Order;

use super::price_level::PriceLevel;

/// Ask (sell) side order book
///
/// Orders are sorted by price ascending, so the lowest ask is first.
/// At each price level, orders are maintained in FIFO order. Empty price
/// levels are removed eagerly, so every stored level holds at least one
/// order with positive volume.
#[derive(Debug, Clone)]
pub struct AskBook {
    /// Price levels; BTreeMap iteration is ascending, best ask is first
    levels: BTreeMap<Price, PriceLevel>,
    /// Locator from order id to the price level holding it
    index: HashMap<OrderId, Price>,
}

impl AskBook {
    /// Create a new empty ask book
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

    /// Get the best-priority order (lowest price, earliest arrival)
    pub fn peek_best(&self) -> Option<&Order> {
        self.levels
            .iter()
            .next()
            .and_then(|(_, level)| level.peek_front())
    }

    /// Remove and return the best-priority order
    ///
    /// # Panics
    /// Panics if the book is empty; callers check before consuming
    pub fn pop_best(&mut self) -> Order {
        let price = match self.levels.keys().next().copied() {
            Some(price) => price,
            None => panic!("pop_best called on an empty ask book"),
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
            .next()
            .expect("reduce_best called on an empty ask book");
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

    /// Remove an order from the ask book
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

    /// Get the best ask (lowest price) and the volume resting there
    pub fn best_ask(&self) -> Option<(Price, Volume)> {
        // BTreeMap iter is ascending, so first() gives us lowest price
        self.levels
            .iter()
            .next()
            .map(|(price, level)| (*price, level.total_volume()))
    }

    /// Get the best ask price
    pub fn best_ask_price(&self) -> Option<Price> {
        self.levels.keys().next().copied()
    }

    /// Get depth snapshot (top N price levels)
    pub fn depth_snapshot(&self, depth: usize) -> Vec<(Price, Volume)> {
        self.levels
            .iter()
            .take(depth)
            .map(|(price, level)| (*price, level.total_volume()))
            .collect()
    }

    /// Check if the ask book is empty
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

impl Default for AskBook {
    fn default() -> Self {
        Self::new()
    }
}
