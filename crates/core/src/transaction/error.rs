//! Transaction error types.

use thiserror::Error;

/// Transaction validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    /// Amount must be strictly positive.
    #[error("Amount must be greater than zero")]
    NonPositiveAmount,

    /// Recurrence date could not be computed.
    #[error("Next recurrence falls outside the supported calendar")]
    RecurrenceOutOfRange,
}
