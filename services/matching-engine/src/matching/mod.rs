//! Matching logic module
//!
//! Price comparison rules for the price-time priority matching loop.

pub mod crossing;

pub use crossing::can_match;
