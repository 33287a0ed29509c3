//! Goal data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Progress of a goal towards its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalStatus {
    /// Target amount.
    pub target_amount: Decimal,
    /// Amount added so far.
    pub amount_added: Decimal,
    /// Amount still missing, never negative.
    pub remaining_amount: Decimal,
    /// Whether the target has been reached.
    pub finished: bool,
}
