//! Shared engine handle for concurrent callers
//!
//! The engine itself takes `&mut self` and never blocks; this wrapper is the
//! one mutual-exclusion boundary per instrument. Every public operation runs
//! as a single critical section, so id assignment order under the lock is the
//! authoritative submission order and each call's event sequence comes back
//! whole, never interleaved with another caller's.

use rust_decimal::Decimal;
use std::sync::{Arc, Mutex, MutexGuard};
use types::errors::OrderError;
use types::event::ExecutionEvent;
use types::ids::OrderId;
use types::numeric::{Price, Volume};

use crate::command::{self, Command, Outcome};
use crate::config::EngineConfig;
use crate::engine::{BookSnapshot, MatchingEngine};
use crate::stats::EngineStats;

/// Cloneable handle to one engine instance.
///
/// Clones share the same books and statistics.
#[derive(Debug, Clone, Default)]
pub struct SharedEngine {
    inner: Arc<Mutex<MatchingEngine>>,
}

impl SharedEngine {
    /// Wrap a fresh engine with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a fresh engine with an explicit configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MatchingEngine::with_config(config))),
        }
    }

    /// Acquire the instrument lock.
    ///
    /// # Panics
    /// Panics if the lock is poisoned: a previous caller died mid-operation
    /// and the book state cannot be trusted.
    fn lock(&self) -> MutexGuard<'_, MatchingEngine> {
        self.inner
            .lock()
            .expect("engine lock poisoned; book state cannot be trusted")
    }

    pub fn submit_ask(
        &self,
        price: Price,
        volume: Volume,
        time: i64,
    ) -> Result<Vec<ExecutionEvent>, OrderError> {
        self.lock().submit_ask(price, volume, time)
    }

    pub fn submit_bid(
        &self,
        price: Price,
        volume: Volume,
        time: i64,
    ) -> Result<Vec<ExecutionEvent>, OrderError> {
        self.lock().submit_bid(price, volume, time)
    }

    pub fn modify_order(&self, order_id: OrderId, delta_volume: i64) -> bool {
        self.lock().modify_order(order_id, delta_volume)
    }

    pub fn cancel_order(&self, order_id: OrderId) -> bool {
        self.lock().cancel_order(order_id)
    }

    /// Dispatch one inbound command under the lock.
    pub fn apply(&self, command: Command) -> Result<Outcome, OrderError> {
        command::apply(&mut self.lock(), command)
    }

    // Read-side accessors; each takes the same lock, so a reader never
    // observes a half-applied submission.

    pub fn stats(&self) -> EngineStats {
        self.lock().stats().clone()
    }

    pub fn snapshot(&self, depth: usize) -> BookSnapshot {
        self.lock().snapshot(depth)
    }

    pub fn best_bid(&self) -> Option<Price> {
        self.lock().best_bid()
    }

    pub fn best_ask(&self) -> Option<Price> {
        self.lock().best_ask()
    }

    pub fn spread(&self) -> Option<Decimal> {
        self.lock().spread()
    }

    pub fn order_count(&self) -> usize {
        self.lock().order_count()
    }

    pub fn last_order_id(&self) -> u64 {
        self.lock().last_order_id()
    }
}
