//! Price level implementation with FIFO queue
//!
//! A price level contains all orders resting at a specific price point.
//! Orders are maintained in FIFO (First-In-First-Out) order, which is the
//! tie-break among equal prices: the earliest arrival matches first.

use std::collections::VecDeque;
use types::ids::OrderId;
use types::numeric::Volume;
use types::order::Order;

/// A price level containing orders at a specific price
///
/// Maintains strict FIFO ordering for time-priority matching, plus the
/// aggregate volume resting at this price.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    /// Queue of orders at this price level (FIFO order)
    orders: VecDeque<Order>,
    /// Total volume available at this level
    total_volume: Volume,
}

impl PriceLevel {
    /// Create a new empty price level
    pub fn new() -> Self {
        Self {
            orders: VecDeque::new(),
            total_volume: Volume::ZERO,
        }
    }

    /// Insert an order at the back of the queue (time priority)
    ///
    /// # Panics
    /// Panics if the order carries zero volume
    pub fn insert(&mut self, order: Order) {
        assert!(
            !order.volume.is_zero(),
            "zero-volume order must not enter the book"
        );
        self.total_volume += order.volume;
        self.orders.push_back(order);
    }

    /// Remove an order from the queue by id
    ///
    /// Returns the removed order, or None if not found
    pub fn remove(&mut self, order_id: OrderId) -> Option<Order> {
        let position = self.orders.iter().position(|order| order.id == order_id)?;
        let order = self.orders.remove(position)?;

        self.total_volume = self.total_volume.saturating_sub(order.volume);
        Some(order)
    }

    /// Peek at the front order without removing it
    pub fn peek_front(&self) -> Option<&Order> {
        self.orders.front()
    }

    /// Pop the front order from the queue
    pub fn pop_front(&mut self) -> Option<Order> {
        let order = self.orders.pop_front()?;

        self.total_volume = self.total_volume.saturating_sub(order.volume);
        Some(order)
    }

    /// Update the remaining volume of the front order
    ///
    /// Used when the front order is partially filled. If the new volume is
    /// zero, the order is removed from the queue.
    pub fn update_front_volume(&mut self, new_volume: Volume) -> bool {
        if let Some(order) = self.orders.front_mut() {
            let old_volume = order.volume;

            if new_volume.is_zero() {
                self.orders.pop_front();
            } else {
                order.volume = new_volume;
            }

            self.total_volume = self.total_volume.saturating_sub(old_volume) + new_volume;
            true
        } else {
            false
        }
    }

    /// Update the remaining volume of an arbitrary order in place
    ///
    /// Queue position is preserved, so a corrected order keeps its time
    /// priority. Returns false if the id is not at this level.
    ///
    /// # Panics
    /// Panics if the new volume is zero; corrections that consume an order
    /// must remove it instead
    pub fn update_volume(&mut self, order_id: OrderId, new_volume: Volume) -> bool {
        assert!(
            !new_volume.is_zero(),
            "resting order volume must stay positive"
        );

        if let Some(order) = self.orders.iter_mut().find(|order| order.id == order_id) {
            let old_volume = order.volume;
            order.volume = new_volume;
            self.total_volume = self.total_volume.saturating_sub(old_volume) + new_volume;
            true
        } else {
            false
        }
    }

    /// Look up an order by id
    pub fn get(&self, order_id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == order_id)
    }

    /// Check if the price level is empty
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Get the total volume at this price level
    pub fn total_volume(&self) -> Volume {
        self.total_volume
    }

    /// Get the number of orders at this level
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }
}

impl Default for PriceLevel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::numeric::Price;

    fn make_order(id: u64, volume: u64) -> Order {
        Order::new(OrderId::new(id), id as i64, Price::from_u64(10), Volume::new(volume))
    }

    #[test]
    fn test_price_level_insert() {
        let mut level = PriceLevel::new();

        level.insert(make_order(1, 5));

        assert_eq!(level.order_count(), 1);
        assert_eq!(level.total_volume(), Volume::new(5));
        assert!(!level.is_empty());
    }

    #[test]
    #[should_panic(expected = "zero-volume order must not enter the book")]
    fn test_price_level_rejects_zero_volume() {
        let mut level = PriceLevel::new();
        level.insert(make_order(1, 0));
    }

    #[test]
    fn test_price_level_fifo_order() {
        let mut level = PriceLevel::new();

        level.insert(make_order(1, 1));
        level.insert(make_order(2, 2));
        level.insert(make_order(3, 3));

        // First order should be at front
        let front = level.peek_front().unwrap();
        assert_eq!(front.id, OrderId::new(1));
        assert_eq!(front.volume, Volume::new(1));
    }

    #[test]
    fn test_price_level_remove() {
        let mut level = PriceLevel::new();

        level.insert(make_order(1, 1));
        level.insert(make_order(2, 2));

        let removed = level.remove(OrderId::new(1)).unwrap();
        assert_eq!(removed.volume, Volume::new(1));
        assert_eq!(level.order_count(), 1);
        assert_eq!(level.total_volume(), Volume::new(2));

        assert!(level.remove(OrderId::new(99)).is_none());
    }

    #[test]
    fn test_price_level_pop_front() {
        let mut level = PriceLevel::new();

        level.insert(make_order(1, 1));
        level.insert(make_order(2, 2));

        let popped = level.pop_front().unwrap();
        assert_eq!(popped.id, OrderId::new(1));
        assert_eq!(level.order_count(), 1);
        assert_eq!(level.total_volume(), Volume::new(2));
    }

    #[test]
    fn test_price_level_update_front_volume() {
        let mut level = PriceLevel::new();

        level.insert(make_order(1, 5));

        // Partial fill
        level.update_front_volume(Volume::new(3));
        assert_eq!(level.total_volume(), Volume::new(3));
        assert_eq!(level.order_count(), 1);

        // Complete fill (zero volume)
        level.update_front_volume(Volume::ZERO);
        assert!(level.is_empty());
        assert_eq!(level.total_volume(), Volume::ZERO);
    }

    #[test]
    fn test_price_level_update_volume_keeps_position() {
        let mut level = PriceLevel::new();

        level.insert(make_order(1, 5));
        level.insert(make_order(2, 4));

        let updated = level.update_volume(OrderId::new(1), Volume::new(2));
        assert!(updated);

        // Order 1 is still at the front with the reduced volume
        let front = level.peek_front().unwrap();
        assert_eq!(front.id, OrderId::new(1));
        assert_eq!(front.volume, Volume::new(2));
        assert_eq!(level.total_volume(), Volume::new(6));

        assert!(!level.update_volume(OrderId::new(99), Volume::new(1)));
    }

    #[test]
    fn test_price_level_total_volume_invariant() {
        let mut level = PriceLevel::new();

        level.insert(make_order(1, 1));
        level.insert(make_order(2, 2));
        level.insert(make_order(3, 3));

        // Total should be sum of all volumes
        assert_eq!(level.total_volume(), Volume::new(6));
    }
}
