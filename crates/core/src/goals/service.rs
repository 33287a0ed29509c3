//! Goal rules.

use rust_decimal::Decimal;

use super::error::GoalError;
use super::types::GoalStatus;

/// Service for goal business logic.
pub struct GoalService;

impl GoalService {
    /// Validates the editable fields of a goal.
    ///
    /// # Errors
    ///
    /// Returns `GoalError::EmptyTitle` for a blank title.
    /// Returns `GoalError::NonPositiveTarget` if `target <= 0`.
    /// Returns `GoalError::NegativeInitialAmount` if `initial` is below zero.
    pub fn validate(
        title: &str,
        target: Decimal,
        initial: Option<Decimal>,
    ) -> Result<(), GoalError> {
        if title.trim().is_empty() {
            return Err(GoalError::EmptyTitle);
        }
        if target <= Decimal::ZERO {
            return Err(GoalError::NonPositiveTarget);
        }
        if let Some(initial) = initial.filter(|i| *i < Decimal::ZERO) {
            return Err(GoalError::NegativeInitialAmount(initial));
        }
        Ok(())
    }

    /// Checks the delta of a contribution.
    ///
    /// # Errors
    ///
    /// Returns `GoalError::NegativeContribution` if `delta < 0`.
    pub fn validate_contribution(delta: Decimal) -> Result<Decimal, GoalError> {
        if delta < Decimal::ZERO {
            return Err(GoalError::NegativeContribution(delta));
        }
        Ok(delta)
    }

    /// A goal is finished once the amount added reaches its target.
    #[must_use]
    pub fn is_finished(amount_added: Decimal, target_amount: Decimal) -> bool {
        amount_added >= target_amount
    }

    /// Progress of a goal.
    #[must_use]
    pub fn status(amount_added: Decimal, target_amount: Decimal) -> GoalStatus {
        GoalStatus {
            target_amount,
            amount_added,
            remaining_amount: (target_amount - amount_added).max(Decimal::ZERO),
            finished: Self::is_finished(amount_added, target_amount),
        }
    }
}
