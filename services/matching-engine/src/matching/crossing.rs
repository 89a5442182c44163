//! Crossing predicate for the matching loop
//!
//! A trade is possible whenever the highest bid meets or exceeds the lowest
//! ask. The same predicate serves both aggressor directions; the execution
//! price is always the resting order's, decided by the engine.

use types::numeric::Price;

/// Check if a bid and ask can match at given prices
///
/// Equal prices cross. The engine evaluates this against the opposite book
/// top before every match step, so a false result ends the loop and rests
/// the aggressor's remainder.
pub fn can_match(bid_price: Price, ask_price: Price) -> bool {
    bid_price >= ask_price
}
