//! Income and expense transactions.
//!
//! Defines the transaction kinds and lifecycle statuses shared by the
//! dashboard, planning and report computations, plus the recurrence rule.

pub mod error;
pub mod types;


pub use error::TransactionError;
pub use types::{TransactionKind, TransactionRecord, TransactionStatus, next_recurrence};
