//! Inbound command interface
//!
//! The session/transport collaborator decodes its wire frames into these
//! commands and dispatches them synchronously; the engine returns either the
//! event sequence of a submission or the success flag of an adjustment.
//! Framing and delivery stay with the transport; the core only guarantees a
//! serializable shape.

use serde::{Deserialize, Serialize};
use types::errors::OrderError;
use types::event::ExecutionEvent;
use types::ids::OrderId;
use types::numeric::{Price, Volume};

use crate::engine::MatchingEngine;

/// One inbound command from the session layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Command {
    /// Submit a sell order
    NewAsk { price: Price, volume: Volume, time: i64 },
    /// Submit a buy order
    NewBid { price: Price, volume: Volume, time: i64 },
    /// Exogenous volume correction to a resting order
    Correct { order_id: OrderId, delta_volume: i64 },
    /// Cancel a resting order
    Cancel { order_id: OrderId },
}

/// Result of applying one command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// A submission was accepted; carries its ordered event sequence
    Submitted(Vec<ExecutionEvent>),
    /// A correction or cancel; carries whether the order was found
    Adjusted(bool),
}

impl Outcome {
    /// Events of a submission, empty for adjustments.
    pub fn events(&self) -> &[ExecutionEvent] {
        match self {
            Outcome::Submitted(events) => events,
            Outcome::Adjusted(_) => &[],
        }
    }
}

/// Dispatch a command to the engine.
///
/// Submission rejections surface as `Err`; a correction or cancel against an
/// unknown id is a normal `Adjusted(false)` outcome, not an error.
pub fn apply(engine: &mut MatchingEngine, command: Command) -> Result<Outcome, OrderError> {
    match command {
        Command::NewAsk { price, volume, time } => {
            engine.submit_ask(price, volume, time).map(Outcome::Submitted)
        }
        Command::NewBid { price, volume, time } => {
            engine.submit_bid(price, volume, time).map(Outcome::Submitted)
        }
        Command::Correct { order_id, delta_volume } => {
            Ok(Outcome::Adjusted(engine.modify_order(order_id, delta_volume)))
        }
        Command::Cancel { order_id } => Ok(Outcome::Adjusted(engine.cancel_order(order_id))),
    }
}
