//! Dashboard aggregation service.

use std::collections::HashMap;

use chrono::Datelike;
use controlwise_shared::types::MonthWindow;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::types::{
    CategoryInfo, CategorySummary, Figure, KindTotals, MonthOverview, MonthSummary,
    UNCATEGORIZED_COLOR, UNCATEGORIZED_LABEL,
};
use crate::transaction::{TransactionKind, TransactionRecord};

/// Service for dashboard computations.
pub struct DashboardService;

impl DashboardService {
    /// Percentage change from `previous` to `current`, rounded to two decimals.
    ///
    /// Defined as zero whenever `previous` is not positive.
    #[must_use]
    pub fn percentage_change(current: Decimal, previous: Decimal) -> Decimal {
        if previous <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        ((current - previous) / previous * Decimal::ONE_HUNDRED).round_dp(2)
    }

    /// Sums executed transactions inside `window` by kind.
    #[must_use]
    pub fn totals_in(records: &[TransactionRecord], window: &MonthWindow) -> KindTotals {
        records
            .iter()
            .filter(|r| r.is_executed() && window.contains(r.date))
            .fold(KindTotals::default(), |mut totals, r| {
                totals.add(r.kind, r.amount);
                totals
            })
    }

    /// Builds the month overview of `current` compared with `previous`.
    #[must_use]
    pub fn month_overview(
        records: &[TransactionRecord],
        current: &MonthWindow,
        previous: &MonthWindow,
    ) -> MonthOverview {
        let now = Self::totals_in(records, current);
        let before = Self::totals_in(records, previous);

        MonthOverview {
            expenses: Self::figure(now.expense, before.expense),
            income: Self::figure(now.income, before.income),
            net: Self::figure(now.net(), before.net()),
        }
    }

    /// Executed expenses of `current` with their change against `previous`.
    #[must_use]
    pub fn expense_overview(
        records: &[TransactionRecord],
        current: &MonthWindow,
        previous: &MonthWindow,
    ) -> Figure {
        let now = Self::totals_in(records, current);
        let before = Self::totals_in(records, previous);
        Self::figure(now.expense, before.expense)
    }

    /// Builds the twelve-month view of `year` in a single pass.
    ///
    /// Every month is present, zero-filled when it has no executed transactions.
    #[must_use]
    pub fn year_overview(records: &[TransactionRecord], year: i32) -> Vec<MonthSummary> {
        let mut buckets = [KindTotals::default(); 12];

        for record in records
            .iter()
            .filter(|r| r.is_executed() && r.date.year() == year)
        {
            buckets[record.date.month0() as usize].add(record.kind, record.amount);
        }

        buckets
            .iter()
            .zip(controlwise_shared::types::MONTH_NAMES)
            .zip(1u32..)
            .map(|((totals, name), month)| MonthSummary {
                month,
                name: name.to_string(),
                expense: totals.expense,
                income: totals.income,
                net: totals.net(),
            })
            .collect()
    }

    /// Groups executed transactions of `window` by category and kind.
    ///
    /// Groups are ordered by descending total. Transactions whose category
    /// is missing from `categories` are reported under the uncategorized label.
    #[must_use]
    pub fn category_summary(
        records: &[TransactionRecord],
        window: &MonthWindow,
        categories: &[CategoryInfo],
    ) -> Vec<CategorySummary> {
        let mut groups: HashMap<(Option<Uuid>, TransactionKind), Decimal> = HashMap::new();
        for record in records
            .iter()
            .filter(|r| r.is_executed() && window.contains(r.date))
        {
            *groups
                .entry((record.category_id, record.kind))
                .or_insert(Decimal::ZERO) += record.amount;
        }

        let lookup: HashMap<Uuid, &CategoryInfo> = categories.iter().map(|c| (c.id, c)).collect();

        let mut summary: Vec<CategorySummary> = groups
            .into_iter()
            .map(|((category_id, kind), total)| {
                let category = category_id.and_then(|id| lookup.get(&id));
                CategorySummary {
                    category_id,
                    name: category
                        .map_or_else(|| UNCATEGORIZED_LABEL.to_string(), |c| c.name.clone()),
                    color_code: category.map_or(UNCATEGORIZED_COLOR, |c| c.color_code),
                    kind,
                    total,
                }
            })
            .collect();

        summary.sort_by(|a, b| {
            b.total
                .cmp(&a.total)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.kind.cmp(&b.kind))
        });
        summary
    }

    fn figure(current: Decimal, previous: Decimal) -> Figure {
        Figure {
            total: current,
            change_percent: Self::percentage_change(current, previous),
        }
    }
}
