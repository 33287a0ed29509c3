//! Common types used across the application.

pub mod money;
pub mod period;

pub use money::{to_fixed, to_fixed_opt};
pub use period::{MONTH_NAMES, MonthWindow, PeriodError, year_bounds};
