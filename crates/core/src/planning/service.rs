//! Planning progress service.

use std::collections::HashMap;

use controlwise_shared::types::MonthWindow;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::error::PlanningError;
use super::types::{PlanningInfo, PlanningProgress};
use crate::transaction::TransactionRecord;

/// Service for planning business logic.
pub struct PlanningService;

impl PlanningService {
    /// Validates the editable fields of a planning.
    ///
    /// # Errors
    ///
    /// Returns `PlanningError::EmptyTitle` for a blank title.
    /// Returns `PlanningError::NonPositiveTarget` if `target <= 0`.
    pub fn validate(title: &str, target: Decimal) -> Result<(), PlanningError> {
        if title.trim().is_empty() {
            return Err(PlanningError::EmptyTitle);
        }
        if target <= Decimal::ZERO {
            return Err(PlanningError::NonPositiveTarget);
        }
        Ok(())
    }

    /// Computes the executed amount of every planning over `window`.
    ///
    /// Only executed transactions linked to a planning and dated inside the
    /// window count. A planning without matches reports zero.
    #[must_use]
    pub fn progress(
        plannings: Vec<PlanningInfo>,
        transactions: &[TransactionRecord],
        window: &MonthWindow,
    ) -> Vec<PlanningProgress> {
        let mut executed: HashMap<Uuid, Decimal> = HashMap::new();
        for tx in transactions
            .iter()
            .filter(|t| t.is_executed() && window.contains(t.date))
        {
            if let Some(planning_id) = tx.planning_id {
                *executed.entry(planning_id).or_insert(Decimal::ZERO) += tx.amount;
            }
        }

        plannings
            .into_iter()
            .map(|planning| {
                let executed_amount = executed.get(&planning.id).copied().unwrap_or_default();
                let remaining_amount =
                    (planning.target_amount - executed_amount).max(Decimal::ZERO);
                PlanningProgress {
                    planning,
                    executed_amount,
                    remaining_amount,
                }
            })
            .collect()
    }
}
