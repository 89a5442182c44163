//! Engine configuration
//!
//! Supplied by the host process at startup. The engine itself reads only
//! the sentinel price; everything else about an instrument (symbol, feed
//! wiring) lives with the transport collaborator.

use types::numeric::Price;

/// Configuration for a single engine instance.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Reserved price meaning "trade at prevailing market price".
    ///
    /// The strategy layer resolves this sentinel to a concrete quote before
    /// submission; an order still carrying it is rejected rather than being
    /// booked at a nonsense price.
    pub market_price_sentinel: Price,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            market_price_sentinel: Price::from_i64(-1),
        }
    }
}
