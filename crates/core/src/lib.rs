//! Core business logic for Control Wise.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `auth` - Password hashing
//! - `transaction` - Transaction kinds, statuses and recurrence
//! - `dashboard` - Monthly and yearly income/expense aggregation
//! - `planning` - Planning progress against executed transactions
//! - `portfolio` - Asset positions, equity and sell validation
//! - `goals` - Savings goal contribution rules

pub mod auth;
pub mod dashboard;
pub mod goals;
pub mod planning;
pub mod portfolio;
pub mod transaction;
