use bazaar_core::{ItemId, OrderSide};
use thiserror::Error;

/// Domain-level errors for matching operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatchingError {
    #[error("Invalid order {order_id}: {reason}")]
    InvalidOrder { order_id: String, reason: String },

    #[error("Order {order_id} is for item {found}, auction is for {expected}")]
    ItemMismatch {
        order_id: String,
        expected: ItemId,
        found: ItemId,
    },

    #[error("Order {order_id} has side {found}, expected {expected}")]
    WrongSide {
        order_id: String,
        expected: OrderSide,
        found: OrderSide,
    },
}

pub type MatchingResult<T> = std::result::Result<T, MatchingError>;

/// Errors surfaced by the pricing engine
///
/// Only missing data and rejected input are errors. Degenerate arithmetic
/// (empty windows, flat series) resolves to safe defaults instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    #[error("Price belief not found for item: {0}")]
    NotFound(ItemId),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type PricingResult<T> = std::result::Result<T, PricingError>;

impl From<MatchingError> for PricingError {
    fn from(err: MatchingError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_errors_become_invalid_input() {
        let err = MatchingError::WrongSide {
            order_id: "o-1".to_string(),
            expected: OrderSide::Bid,
            found: OrderSide::Ask,
        };

        let pricing: PricingError = err.into();
        assert_eq!(
            pricing,
            PricingError::InvalidInput("Order o-1 has side ask, expected bid".to_string())
        );
    }

    #[test]
    fn test_not_found_message() {
        let err = PricingError::NotFound("iron-ore".to_string());
        assert_eq!(err.to_string(), "Price belief not found for item: iron-ore");
    }
}
