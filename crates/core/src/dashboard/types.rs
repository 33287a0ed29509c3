//! Dashboard data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::transaction::TransactionKind;

/// Label used for transactions whose category no longer exists.
pub const UNCATEGORIZED_LABEL: &str = "No category";

/// Color code used for transactions whose category no longer exists.
pub const UNCATEGORIZED_COLOR: i32 = 0;

/// Executed totals split by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindTotals {
    /// Sum of executed expenses.
    pub expense: Decimal,
    /// Sum of executed income.
    pub income: Decimal,
}

impl KindTotals {
    /// Income minus expenses.
    #[must_use]
    pub fn net(&self) -> Decimal {
        self.income - self.expense
    }

    /// Adds an amount to the bucket for `kind`.
    pub fn add(&mut self, kind: TransactionKind, amount: Decimal) {
        match kind {
            TransactionKind::Expense => self.expense += amount,
            TransactionKind::Income => self.income += amount,
        }
    }
}

/// A total together with its change against the prior period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Figure {
    /// Total for the current period.
    pub total: Decimal,
    /// Percentage change against the previous period, two decimals.
    pub change_percent: Decimal,
}

/// Month overview: expenses, income and net with their changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthOverview {
    /// Executed expenses.
    pub expenses: Figure,
    /// Executed income.
    pub income: Figure,
    /// Income minus expenses.
    pub net: Figure,
}

/// One entry of the year view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSummary {
    /// Month number (1..=12).
    pub month: u32,
    /// English month name.
    pub name: String,
    /// Executed expenses.
    pub expense: Decimal,
    /// Executed income.
    pub income: Decimal,
    /// Income minus expenses.
    pub net: Decimal,
}

/// Display data of a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInfo {
    /// Category ID.
    pub id: Uuid,
    /// Category name.
    pub name: String,
    /// Color code.
    pub color_code: i32,
}

/// Executed total of one (category, kind) group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    /// Category ID, `None` when the category is gone.
    pub category_id: Option<Uuid>,
    /// Category name or the uncategorized label.
    pub name: String,
    /// Color code or the uncategorized color.
    pub color_code: i32,
    /// Kind of the grouped transactions.
    pub kind: TransactionKind,
    /// Sum of the group.
    pub total: Decimal,
}
