//! Unit and property-based tests for dashboard aggregation.

use chrono::NaiveDate;
use controlwise_shared::types::MonthWindow;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use super::service::DashboardService;
use super::types::{CategoryInfo, UNCATEGORIZED_LABEL};
use crate::transaction::{TransactionKind, TransactionRecord, TransactionStatus};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn record(
    amount: Decimal,
    kind: TransactionKind,
    status: TransactionStatus,
    on: NaiveDate,
    category_id: Option<Uuid>,
) -> TransactionRecord {
    TransactionRecord {
        id: Uuid::new_v4(),
        amount,
        kind,
        status,
        date: on,
        category_id,
        planning_id: None,
    }
}

fn executed(amount: Decimal, kind: TransactionKind, on: NaiveDate) -> TransactionRecord {
    record(amount, kind, TransactionStatus::Executed, on, None)
}

// ============================================================================
// Percentage change
// ============================================================================

#[test]
fn test_percentage_change_increase() {
    assert_eq!(
        DashboardService::percentage_change(dec!(150), dec!(100)),
        dec!(50.00)
    );
}

#[test]
fn test_percentage_change_decrease_rounds_to_two_decimals() {
    assert_eq!(
        DashboardService::percentage_change(dec!(200), dec!(300)),
        dec!(-33.33)
    );
}

#[test]
fn test_percentage_change_negative_previous_is_zero() {
    assert_eq!(
        DashboardService::percentage_change(dec!(100), dec!(-50)),
        Decimal::ZERO
    );
}

proptest! {
    /// A zero previous total always yields exactly zero change.
    #[test]
    fn prop_zero_previous_yields_zero(current in -1_000_000i64..1_000_000) {
        let change = DashboardService::percentage_change(Decimal::new(current, 2), Decimal::ZERO);
        prop_assert_eq!(change, Decimal::ZERO);
        prop_assert_eq!(controlwise_shared::types::to_fixed(change), "0.00");
    }

    /// Equal totals never report a change.
    #[test]
    fn prop_equal_totals_yield_zero(value in 1i64..1_000_000) {
        let value = Decimal::new(value, 2);
        prop_assert_eq!(DashboardService::percentage_change(value, value), Decimal::ZERO);
    }
}

// ============================================================================
// Month overview
// ============================================================================

#[test]
fn test_month_overview_only_counts_executed_in_window() {
    let current = MonthWindow::new(2024, 3).unwrap();
    let previous = current.previous().unwrap();
    let records = vec![
        executed(dec!(100), TransactionKind::Expense, date(2024, 3, 5)),
        executed(dec!(1000), TransactionKind::Income, date(2024, 3, 1)),
        record(
            dec!(999),
            TransactionKind::Expense,
            TransactionStatus::Pending,
            date(2024, 3, 6),
            None,
        ),
        record(
            dec!(999),
            TransactionKind::Income,
            TransactionStatus::Canceled,
            date(2024, 3, 7),
            None,
        ),
        executed(dec!(50), TransactionKind::Expense, date(2024, 2, 10)),
        executed(dec!(500), TransactionKind::Income, date(2024, 2, 29)),
        executed(dec!(77), TransactionKind::Expense, date(2024, 4, 1)),
    ];

    let overview = DashboardService::month_overview(&records, &current, &previous);

    assert_eq!(overview.expenses.total, dec!(100));
    assert_eq!(overview.expenses.change_percent, dec!(100.00));
    assert_eq!(overview.income.total, dec!(1000));
    assert_eq!(overview.income.change_percent, dec!(100.00));
    assert_eq!(overview.net.total, dec!(900));
    assert_eq!(overview.net.change_percent, dec!(100.00));
}

#[test]
fn test_january_compares_with_previous_december() {
    let current = MonthWindow::new(2024, 1).unwrap();
    let previous = current.previous().unwrap();
    let records = vec![
        executed(dec!(300), TransactionKind::Expense, date(2024, 1, 10)),
        executed(dec!(200), TransactionKind::Expense, date(2023, 12, 31)),
    ];

    let figure = DashboardService::expense_overview(&records, &current, &previous);

    assert_eq!(figure.total, dec!(300));
    assert_eq!(figure.change_percent, dec!(50.00));
}

#[test]
fn test_net_change_with_negative_previous_net_is_zero() {
    let current = MonthWindow::new(2024, 6).unwrap();
    let previous = current.previous().unwrap();
    let records = vec![
        executed(dec!(100), TransactionKind::Income, date(2024, 6, 1)),
        executed(dec!(500), TransactionKind::Expense, date(2024, 5, 1)),
    ];

    let overview = DashboardService::month_overview(&records, &current, &previous);

    assert_eq!(overview.net.total, dec!(100));
    assert_eq!(overview.net.change_percent, Decimal::ZERO);
}

// ============================================================================
// Year overview
// ============================================================================

#[test]
fn test_empty_year_has_twelve_zero_months() {
    let months = DashboardService::year_overview(&[], 2024);

    assert_eq!(months.len(), 12);
    for (i, month) in months.iter().enumerate() {
        assert_eq!(month.month as usize, i + 1);
        assert_eq!(month.expense, Decimal::ZERO);
        assert_eq!(month.income, Decimal::ZERO);
        assert_eq!(month.net, Decimal::ZERO);
    }
    assert_eq!(months[0].name, "January");
}

#[test]
fn test_year_overview_distributes_by_month() {
    let records = vec![
        executed(dec!(10), TransactionKind::Expense, date(2024, 1, 31)),
        executed(dec!(25), TransactionKind::Income, date(2024, 1, 2)),
        executed(dec!(40), TransactionKind::Expense, date(2024, 12, 31)),
        executed(dec!(99), TransactionKind::Expense, date(2023, 12, 31)),
        record(
            dec!(99),
            TransactionKind::Income,
            TransactionStatus::Pending,
            date(2024, 6, 1),
            None,
        ),
    ];

    let months = DashboardService::year_overview(&records, 2024);

    assert_eq!(months[0].expense, dec!(10));
    assert_eq!(months[0].income, dec!(25));
    assert_eq!(months[0].net, dec!(15));
    assert_eq!(months[5].income, Decimal::ZERO);
    assert_eq!(months[11].expense, dec!(40));
    assert_eq!(months[11].net, dec!(-40));
}

// ============================================================================
// Category summary
// ============================================================================

#[test]
fn test_category_summary_orders_by_total_and_labels_missing_categories() {
    let window = MonthWindow::new(2024, 3).unwrap();
    let home = Uuid::new_v4();
    let car = Uuid::new_v4();
    let deleted = Uuid::new_v4();
    let categories = vec![
        CategoryInfo {
            id: home,
            name: "Home".to_string(),
            color_code: 1,
        },
        CategoryInfo {
            id: car,
            name: "Car".to_string(),
            color_code: 2,
        },
    ];
    let records = vec![
        record(
            dec!(40),
            TransactionKind::Expense,
            TransactionStatus::Executed,
            date(2024, 3, 1),
            Some(car),
        ),
        record(
            dec!(100),
            TransactionKind::Expense,
            TransactionStatus::Executed,
            date(2024, 3, 2),
            Some(home),
        ),
        record(
            dec!(30),
            TransactionKind::Expense,
            TransactionStatus::Executed,
            date(2024, 3, 3),
            Some(car),
        ),
        record(
            dec!(5),
            TransactionKind::Expense,
            TransactionStatus::Executed,
            date(2024, 3, 4),
            Some(deleted),
        ),
        record(
            dec!(1),
            TransactionKind::Expense,
            TransactionStatus::Executed,
            date(2024, 3, 4),
            None,
        ),
        record(
            dec!(500),
            TransactionKind::Expense,
            TransactionStatus::Pending,
            date(2024, 3, 4),
            Some(home),
        ),
    ];

    let summary = DashboardService::category_summary(&records, &window, &categories);

    assert_eq!(summary.len(), 4);
    assert_eq!(summary[0].name, "Home");
    assert_eq!(summary[0].total, dec!(100));
    assert_eq!(summary[1].name, "Car");
    assert_eq!(summary[1].total, dec!(70));
    assert_eq!(summary[1].color_code, 2);
    assert_eq!(summary[2].name, UNCATEGORIZED_LABEL);
    assert_eq!(summary[2].total, dec!(5));
    assert_eq!(summary[2].color_code, 0);
    assert_eq!(summary[3].category_id, None);
    assert_eq!(summary[3].name, UNCATEGORIZED_LABEL);
}

#[test]
fn test_category_summary_splits_kinds() {
    let window = MonthWindow::new(2024, 3).unwrap();
    let mixed = Uuid::new_v4();
    let categories = vec![CategoryInfo {
        id: mixed,
        name: "Mixed".to_string(),
        color_code: 4,
    }];
    let records = vec![
        record(
            dec!(10),
            TransactionKind::Expense,
            TransactionStatus::Executed,
            date(2024, 3, 1),
            Some(mixed),
        ),
        record(
            dec!(20),
            TransactionKind::Income,
            TransactionStatus::Executed,
            date(2024, 3, 1),
            Some(mixed),
        ),
    ];

    let summary = DashboardService::category_summary(&records, &window, &categories);

    assert_eq!(summary.len(), 2);
    assert_eq!(summary[0].kind, TransactionKind::Income);
    assert_eq!(summary[1].kind, TransactionKind::Expense);
}
