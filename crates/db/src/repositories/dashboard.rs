//! Dashboard repository: month and year income/expense views.
//!
//! Rows are fetched raw and aggregated in memory by
//! `controlwise_core::dashboard::DashboardService`.

use controlwise_core::dashboard::{
    CategoryInfo, CategorySummary, DashboardService, Figure, MonthOverview, MonthSummary,
};
use controlwise_shared::types::{MonthWindow, PeriodError, year_bounds};
use sea_orm::{DatabaseConnection, DbErr, EntityTrait};

use super::transaction::TransactionRepository;
use crate::entities::categories;
use crate::scope::OwnerScope;

/// Error types for dashboard queries.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Requested period cannot be represented.
    #[error(transparent)]
    Period(#[from] PeriodError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<&categories::Model> for CategoryInfo {
    fn from(model: &categories::Model) -> Self {
        Self {
            id: model.id,
            name: model.name.clone(),
            color_code: model.color_code,
        }
    }
}

/// Dashboard repository.
#[derive(Debug, Clone)]
pub struct DashboardRepository {
    db: DatabaseConnection,
    transactions: TransactionRepository,
}

impl DashboardRepository {
    /// Creates a new dashboard repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            transactions: TransactionRepository::new(db.clone()),
            db,
        }
    }

    /// Totals of `window` against the month before it.
    ///
    /// # Errors
    ///
    /// Returns an error if the previous month cannot be represented or a
    /// database query fails.
    pub async fn month_overview(
        &self,
        scope: OwnerScope,
        window: &MonthWindow,
    ) -> Result<MonthOverview, DashboardError> {
        let previous = window.previous()?;
        let records = self
            .transactions
            .executed_between(scope, previous.start(), window.end())
            .await?;
        Ok(DashboardService::month_overview(&records, window, &previous))
    }

    /// Expense total of `window` against the month before it.
    ///
    /// # Errors
    ///
    /// Returns an error if the previous month cannot be represented or a
    /// database query fails.
    pub async fn expense_overview(
        &self,
        scope: OwnerScope,
        window: &MonthWindow,
    ) -> Result<Figure, DashboardError> {
        let previous = window.previous()?;
        let records = self
            .transactions
            .executed_between(scope, previous.start(), window.end())
            .await?;
        Ok(DashboardService::expense_overview(&records, window, &previous))
    }

    /// Executed totals of `window` grouped by category and kind.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn category_summary(
        &self,
        scope: OwnerScope,
        window: &MonthWindow,
    ) -> Result<Vec<CategorySummary>, DashboardError> {
        let records = self
            .transactions
            .executed_between(scope, window.start(), window.end())
            .await?;
        let categories: Vec<CategoryInfo> = scope
            .find::<categories::Entity>()
            .all(&self.db)
            .await?
            .iter()
            .map(CategoryInfo::from)
            .collect();

        Ok(DashboardService::category_summary(&records, window, &categories))
    }

    /// Twelve monthly totals of `year`.
    ///
    /// # Errors
    ///
    /// Returns an error if the year is out of range or a database query fails.
    pub async fn year_overview(
        &self,
        scope: OwnerScope,
        year: i32,
    ) -> Result<Vec<MonthSummary>, DashboardError> {
        let (from, to) = year_bounds(year)?;
        let records = self.transactions.executed_between(scope, from, to).await?;
        Ok(DashboardService::year_overview(&records, year))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use uuid::Uuid;

    use super::*;
    use crate::entities::sea_orm_active_enums::{TransactionKind, TransactionStatus};
    use crate::entities::transactions;

    fn executed(
        user_id: Uuid,
        amount: Decimal,
        kind: TransactionKind,
        date: NaiveDate,
    ) -> transactions::Model {
        let now = chrono::Utc::now().into();
        transactions::Model {
            id: Uuid::new_v4(),
            user_id,
            amount,
            description: None,
            kind,
            date,
            status: TransactionStatus::Executed,
            category_id: None,
            is_recurring: false,
            next_recurrence: None,
            planning_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_month_overview_spans_previous_and_current_month() {
        let user_id = Uuid::new_v4();
        let jan_20 = NaiveDate::from_ymd_opt(2026, 1, 20).unwrap();
        let feb_3 = NaiveDate::from_ymd_opt(2026, 2, 3).unwrap();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                executed(user_id, dec!(200), TransactionKind::Expense, jan_20),
                executed(user_id, dec!(300), TransactionKind::Expense, feb_3),
            ]])
            .into_connection();
        let repo = DashboardRepository::new(db.clone());

        let window = MonthWindow::new(2026, 2).unwrap();
        let overview = repo.month_overview(OwnerScope::new(user_id), &window).await.unwrap();

        assert_eq!(overview.expenses.total, dec!(300));
        assert_eq!(overview.expenses.change_percent, dec!(50.00));
        assert_eq!(overview.income.change_percent, Decimal::ZERO);

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("2026-01-01"));
        assert!(log.contains("2026-03-01"));
    }

    #[tokio::test]
    async fn test_year_overview_of_empty_year() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<transactions::Model>::new()])
            .into_connection();
        let repo = DashboardRepository::new(db);

        let months = repo.year_overview(OwnerScope::new(Uuid::new_v4()), 2026).await.unwrap();

        assert_eq!(months.len(), 12);
        assert!(months.iter().all(|m| m.net == Decimal::ZERO));
    }
}
