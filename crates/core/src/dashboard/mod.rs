//! Dashboard aggregation over executed transactions.
//!
//! This module provides pure computations for the dashboard views:
//! - Month totals by kind with change against the prior month
//! - Twelve-month year view
//! - Category breakdown of a month

pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use service::DashboardService;
pub use types::*;
