//! Planning error types.

use thiserror::Error;

/// Planning validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanningError {
    /// Target must be strictly positive.
    #[error("Target amount must be greater than zero")]
    NonPositiveTarget,

    /// Title is blank.
    #[error("Title is required")]
    EmptyTitle,
}
