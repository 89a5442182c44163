//! Types library for the matching core
//!
//! This library provides the core type definitions shared by the matching
//! engine and its collaborators, ensuring type safety, deterministic
//! behavior, and backward compatibility.
//!
//! # Version
//! v1.0.0 - Frozen
//!
//! # Modules
//! - `ids`: Unique identifiers (OrderId)
//! - `numeric`: Fixed-point decimal price and integer volume types
//! - `order`: Order record and side
//! - `event`: Execution event records emitted by the engine
//! - `errors`: Error taxonomy

// Public modules
pub mod ids;
pub mod numeric;
pub mod order;
pub mod event;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::order::*;
    pub use crate::event::*;
    pub use crate::errors::*;
}
