//! Goal error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Goal validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GoalError {
    /// Title is blank.
    #[error("Title is required")]
    EmptyTitle,

    /// Target must be strictly positive.
    #[error("Target amount must be greater than zero")]
    NonPositiveTarget,

    /// Initial amount cannot be negative.
    #[error("Initial amount cannot be negative: {0}")]
    NegativeInitialAmount(Decimal),

    /// Contributions only ever add to a goal.
    #[error("Amount to add cannot be negative: {0}")]
    NegativeContribution(Decimal),
}
