//! Error types for the matching engine
//!
//! Submission rejections are recoverable and reported per call; the two
//! books are untouched when one is returned. Anything that would leave the
//! books in a state the matching loop cannot trust is a defect and panics
//! instead of appearing here.

use thiserror::Error;

/// Top-level engine error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    #[error("System error: {message}")]
    System { message: String },
}

/// Submission-time rejections
///
/// Raised before an id is assigned or any book mutation occurs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrderError {
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Invalid volume: {0}")]
    InvalidVolume(String),

    #[error("Market order reached the engine with an unresolved sentinel price")]
    UnpricedMarketOrder,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_error_display() {
        let err = OrderError::InvalidPrice("negative".to_string());
        assert_eq!(err.to_string(), "Invalid price: negative");

        let err = OrderError::InvalidVolume("zero".to_string());
        assert_eq!(err.to_string(), "Invalid volume: zero");
    }

    #[test]
    fn test_engine_error_from_order_error() {
        let order_err = OrderError::UnpricedMarketOrder;
        let engine_err: EngineError = order_err.into();
        assert!(matches!(engine_err, EngineError::Order(_)));
    }
}
