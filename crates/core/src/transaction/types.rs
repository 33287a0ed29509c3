//! Transaction domain types.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::TransactionError;

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    /// Money going out.
    Expense,
    /// Money coming in.
    Income,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expense => write!(f, "EXPENSE"),
            Self::Income => write!(f, "INCOME"),
        }
    }
}

/// Lifecycle status of a transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    /// Scheduled, not yet settled.
    #[default]
    Pending,
    /// Settled; the only status counted in totals.
    Executed,
    /// Abandoned.
    Canceled,
}

impl TransactionStatus {
    /// Returns true if the transaction is still scheduled.
    #[must_use]
    pub const fn is_scheduled(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// The slice of a persisted transaction the aggregations need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    /// Transaction ID.
    pub id: Uuid,
    /// Positive amount.
    pub amount: Decimal,
    /// Expense or income.
    pub kind: TransactionKind,
    /// Lifecycle status.
    pub status: TransactionStatus,
    /// Booking date.
    pub date: NaiveDate,
    /// Category, if it still exists.
    pub category_id: Option<Uuid>,
    /// Planning the transaction counts towards.
    pub planning_id: Option<Uuid>,
}

impl TransactionRecord {
    /// Returns true if the transaction counts towards totals.
    #[must_use]
    pub const fn is_executed(&self) -> bool {
        matches!(self.status, TransactionStatus::Executed)
    }

    /// Validates a new transaction amount.
    ///
    /// # Errors
    ///
    /// Returns `TransactionError::NonPositiveAmount` if `amount <= 0`.
    pub fn validate_amount(amount: Decimal) -> Result<(), TransactionError> {
        if amount <= Decimal::ZERO {
            return Err(TransactionError::NonPositiveAmount);
        }
        Ok(())
    }
}

/// Computes the next occurrence of a recurring transaction.
///
/// Recurring transactions repeat monthly; month-end dates clamp to the last
/// day of the following month (Jan 31 -> Feb 28/29). Non-recurring
/// transactions have no next occurrence.
///
/// # Errors
///
/// Returns `TransactionError::RecurrenceOutOfRange` if the date overflows.
pub fn next_recurrence(
    date: NaiveDate,
    is_recurring: bool,
) -> Result<Option<NaiveDate>, TransactionError> {
    if !is_recurring {
        return Ok(None);
    }

    date.checked_add_months(Months::new(1))
        .map(Some)
        .ok_or(TransactionError::RecurrenceOutOfRange)
}
