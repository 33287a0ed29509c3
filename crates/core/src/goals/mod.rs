//! Savings goals.
//!
//! Contributions are applied by the persistence layer as an atomic
//! increment; this module only holds the rules checked beforehand.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::GoalError;
pub use service::GoalService;
pub use types::GoalStatus;
