//! Numeric types for prices and volumes
//!
//! Prices are fixed-point decimals (`rust_decimal`) so that comparisons and
//! notional arithmetic are exact and deterministic. Volumes are plain
//! integers: the instrument trades in whole units.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Limit price of an order
///
/// Signed and totally ordered, so it can key a sorted book directly.
/// Negative values are not valid quotes but must be representable: the
/// surrounding strategy code reserves a negative sentinel for "market
/// price", and the engine has to recognize and reject it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    pub const ZERO: Price = Price(Decimal::ZERO);

    /// Create from a decimal value
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Create from an unsigned integer quote
    pub fn from_u64(value: u64) -> Self {
        Self(Decimal::from(value))
    }

    /// Create from a signed integer quote (sentinel values are negative)
    pub fn from_i64(value: i64) -> Self {
        Self(Decimal::from(value))
    }

    /// Parse from a decimal string
    pub fn from_str(s: &str) -> Result<Self, rust_decimal::Error> {
        Decimal::from_str_exact(s).map(Self)
    }

    /// Get the inner decimal value
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Check whether the price is below zero
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Order volume in whole units
///
/// Strictly positive while an order is resident in a book; zero is only a
/// transient value during validation and fill arithmetic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Volume(u64);

impl Volume {
    pub const ZERO: Volume = Volume(0);

    /// Create from a raw unit count
    pub fn new(units: u64) -> Self {
        Self(units)
    }

    /// Get the raw unit count
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Check for zero volume
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Subtract, clamping at zero
    pub fn saturating_sub(self, rhs: Volume) -> Volume {
        Volume(self.0.saturating_sub(rhs.0))
    }
}

impl Add for Volume {
    type Output = Volume;

    fn add(self, rhs: Volume) -> Volume {
        Volume(self.0 + rhs.0)
    }
}

impl AddAssign for Volume {
    fn add_assign(&mut self, rhs: Volume) {
        self.0 += rhs.0;
    }
}

impl Sub for Volume {
    type Output = Volume;

    fn sub(self, rhs: Volume) -> Volume {
        Volume(self.0 - rhs.0)
    }
}

impl SubAssign for Volume {
    fn sub_assign(&mut self, rhs: Volume) {
        self.0 -= rhs.0;
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn price_serde_round_trips(units in 0u64..1_000_000, cents in 0u32..100) {
            let text = format!("{}.{:02}", units, cents);
            let price = Price::from_str(&text).unwrap();

            let json = serde_json::to_string(&price).unwrap();
            let back: Price = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(price, back);
        }

        #[test]
        fn price_ordering_matches_decimal(a in -1_000i64..1_000, b in -1_000i64..1_000) {
            let (pa, pb) = (Price::from_i64(a), Price::from_i64(b));
            prop_assert_eq!(pa < pb, a < b);
            prop_assert_eq!(pa == pb, a == b);
        }

        #[test]
        fn volume_sub_then_add_is_identity(a in 0u64..1_000_000, b in 0u64..1_000_000) {
            let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
            let diff = Volume::new(hi) - Volume::new(lo);
            prop_assert_eq!(diff + Volume::new(lo), Volume::new(hi));
        }
    }
}
