//! Portfolio error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Movement validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortfolioError {
    /// Nothing is held, so nothing can be sold.
    #[error("No position in this asset to sell")]
    NoPosition,

    /// Sell quantity exceeds the quantity held.
    #[error("Insufficient quantity: requested {requested}, available {available}")]
    InsufficientQuantity {
        /// Quantity the caller tried to sell.
        requested: Decimal,
        /// Quantity currently held.
        available: Decimal,
    },

    /// Quantity must be strictly positive.
    #[error("Quantity must be greater than zero")]
    NonPositiveQuantity,

    /// Unit price must be strictly positive.
    #[error("Unit price must be greater than zero")]
    NonPositivePrice,
}
