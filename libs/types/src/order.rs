//! Order record and side
//!
//! An order is created by the engine at submission time and lives in exactly
//! one book side until it is fully consumed, canceled, or corrected away.
//! Which side holds it determines whether it is a bid or an ask; the record
//! itself carries no side field.

use crate::ids::OrderId;
use crate::numeric::{Price, Volume};
use serde::{Deserialize, Serialize};

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order (bid)
    BUY,
    /// Sell order (ask)
    SELL,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::BUY => Side::SELL,
            Side::SELL => Side::BUY,
        }
    }
}

/// A resting or incoming order
///
/// `volume` is the only mutable field; `id`, `time`, and `price` are fixed
/// at submission. `time` is the caller-supplied timestamp or sequence
/// number, echoed on every event that refers to this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub time: i64,
    pub price: Price,
    pub volume: Volume,
}

impl Order {
    /// Create a new order
    pub fn new(id: OrderId, time: i64, price: Price, volume: Volume) -> Self {
        Self {
            id,
            time,
            price,
            volume,
        }
    }

    /// Reduce the remaining volume by a fill
    ///
    /// # Panics
    /// Panics if the fill exceeds the remaining volume
    pub fn reduce(&mut self, fill: Volume) {
        assert!(
            fill <= self.volume,
            "Fill would exceed order volume"
        );
        self.volume -= fill;
    }

    /// Check if the order has been fully consumed
    pub fn is_consumed(&self) -> bool {
        self.volume.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_order() -> Order {
        Order::new(OrderId::new(1), 17, Price::from_u64(10), Volume::new(5))
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::BUY.opposite(), Side::SELL);
        assert_eq!(Side::SELL.opposite(), Side::BUY);
    }

    #[test]
    fn test_order_reduce() {
        let mut order = sample_order();

        order.reduce(Volume::new(3));
        assert_eq!(order.volume, Volume::new(2));
        assert!(!order.is_consumed());

        order.reduce(Volume::new(2));
        assert!(order.is_consumed());
    }

    #[test]
    #[should_panic(expected = "Fill would exceed order volume")]
    fn test_order_overfill_panics() {
        let mut order = sample_order();
        order.reduce(Volume::new(6));
    }

    #[test]
    fn test_order_serialization() {
        let order = sample_order();
        let json = serde_json::to_string(&order).unwrap();
        let deserialized: Order = serde_json::from_str(&json).unwrap();

        assert_eq!(order, deserialized);
        assert_eq!(deserialized.time, 17);
    }
}
