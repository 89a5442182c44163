//! Execution event records emitted by the engine
//!
//! Every engine submission returns an ordered sequence of these events:
//! first the acknowledgement of the incoming order, then one pair of fill
//! events per match (resting order first, aggressor second). Events are
//! immutable once created and are only ever appended to an output sequence.
//!
//! The single-letter action codes are the tags of the exchange line
//! protocol and are preserved in the serde representation.

use crate::ids::OrderId;
use crate::numeric::{Price, Volume};
use crate::order::{Order, Side};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of execution event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExecAction {
    /// Acknowledgement of a newly submitted ask
    #[serde(rename = "S")]
    NewSell,
    /// Acknowledgement of a newly submitted bid
    #[serde(rename = "B")]
    NewBuy,
    /// An order's volume was reduced but remains nonzero
    #[serde(rename = "E")]
    PartialFill,
    /// An order's volume was fully consumed and the order removed
    #[serde(rename = "F")]
    FullFill,
}

impl ExecAction {
    /// Wire-protocol tag for this action
    pub fn code(&self) -> &'static str {
        match self {
            ExecAction::NewSell => "S",
            ExecAction::NewBuy => "B",
            ExecAction::PartialFill => "E",
            ExecAction::FullFill => "F",
        }
    }

    /// Check if the action reports a fill rather than an acknowledgement
    pub fn is_fill(&self) -> bool {
        matches!(self, ExecAction::PartialFill | ExecAction::FullFill)
    }
}

impl fmt::Display for ExecAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One observable outcome of a submission
///
/// `time` is the timestamp of the order the event refers to, not the time
/// of the match: a fill against a resting order carries that order's own
/// submission time, so subscribers can correlate fills with their orders
/// without a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionEvent {
    pub time: i64,
    pub order_id: OrderId,
    pub action: ExecAction,
    pub price: Price,
    pub volume: Volume,
}

impl ExecutionEvent {
    /// Create an event from its raw fields
    pub fn new(time: i64, order_id: OrderId, action: ExecAction, price: Price, volume: Volume) -> Self {
        Self {
            time,
            order_id,
            action,
            price,
            volume,
        }
    }

    /// Acknowledgement of a newly accepted order, before any matching
    pub fn ack(side: Side, order: &Order) -> Self {
        let action = match side {
            Side::SELL => ExecAction::NewSell,
            Side::BUY => ExecAction::NewBuy,
        };
        Self::new(order.time, order.id, action, order.price, order.volume)
    }

    /// Partial fill of `order` at the given execution price
    pub fn partial_fill(order: &Order, price: Price, volume: Volume) -> Self {
        Self::new(order.time, order.id, ExecAction::PartialFill, price, volume)
    }

    /// Full fill of `order` at the given execution price
    pub fn full_fill(order: &Order, price: Price, volume: Volume) -> Self {
        Self::new(order.time, order.id, ExecAction::FullFill, price, volume)
    }
}
