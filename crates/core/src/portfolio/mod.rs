//! Investment portfolio computations.
//!
//! Positions are always derived from the raw movement history:
//! - Quantity held and equity (buy value minus sell value)
//! - Average price under the average-cost method
//! - Equity by asset type, monthly evolution, yearly summary
//! - The available-quantity check guarding every sell

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::PortfolioError;
pub use service::PortfolioService;
pub use types::*;
