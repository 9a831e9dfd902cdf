//! Domain error taxonomy
//!
//! A single error kind exists: `InvalidInput`, raised when the stock-days
//! denominator is not positive. Every other numeric input is accepted and
//! produces a numeric result.

use thiserror::Error;

/// Errors raised by the metrics classifier
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricsError {
    /// Non-positive weekly demand makes the stock-days projection undefined
    #[error("invalid input: weekly demand must be positive (got {demand})")]
    InvalidInput { demand: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message_names_the_value() {
        let err = MetricsError::InvalidInput { demand: 0.0 };
        assert_eq!(
            err.to_string(),
            "invalid input: weekly demand must be positive (got 0)"
        );
    }
}
