//! Matching Engine Service
//!
//! Limit-order matching core for a single instrument: two price-ordered
//! books, price-time priority matching, a deterministic ordered stream of
//! execution events, and running trade statistics.
//!
//! **Key Invariants:**
//! - Price-time priority strictly enforced
//! - Deterministic matching (same inputs → same outputs)
//! - No resting order ever holds zero or negative volume
//! - Best bid stays strictly below best ask after every command

pub mod book;
pub mod matching;
pub mod engine;
pub mod stats;
pub mod config;
pub mod command;
pub mod shared;

pub use config::EngineConfig;
pub use engine::{BookSnapshot, MatchingEngine};
pub use shared::SharedEngine;
pub use stats::EngineStats;
