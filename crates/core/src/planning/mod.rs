//! Planning progress tracking.
//!
//! A planning is a spending (or earning) target for a category. Its executed
//! amount is never stored; it is recomputed from the executed transactions
//! linked to it.

pub mod error;
pub mod service;
pub mod types;


pub use error::PlanningError;
pub use service::PlanningService;
pub use types::{PlanningInfo, PlanningProgress};
