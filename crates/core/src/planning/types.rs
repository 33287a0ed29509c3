//! Planning data types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::transaction::TransactionKind;

/// A persisted planning, as the progress computation sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningInfo {
    /// Planning ID.
    pub id: Uuid,
    /// Title.
    pub title: String,
    /// Target amount.
    pub target_amount: Decimal,
    /// Expense or income planning.
    pub kind: TransactionKind,
    /// Linked category.
    pub category_id: Uuid,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// A planning together with its executed amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningProgress {
    /// The planning.
    pub planning: PlanningInfo,
    /// Sum of linked executed transactions in the window.
    pub executed_amount: Decimal,
    /// Target minus executed, floored at zero.
    pub remaining_amount: Decimal,
}
