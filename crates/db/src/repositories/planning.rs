//! Planning repository.

use controlwise_core::planning::{
    PlanningError as DomainError, PlanningInfo, PlanningProgress, PlanningService,
};
use controlwise_core::transaction::TransactionRecord;
use controlwise_shared::types::MonthWindow;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{
    categories, plannings,
    sea_orm_active_enums::{TransactionKind, TransactionStatus},
    transactions,
};
use crate::scope::OwnerScope;

/// Error types for planning operations.
#[derive(Debug, thiserror::Error)]
pub enum PlanningError {
    /// Planning not found (or not owned by the caller).
    #[error("Planning not found: {0}")]
    NotFound(Uuid),

    /// Referenced category is missing or belongs to someone else.
    #[error("Category not found: {0}")]
    CategoryNotFound(Uuid),

    /// Domain rule violated.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Planning progress with the category it belongs to.
#[derive(Debug, Clone)]
pub struct PlanningWithProgress {
    /// Executed amount against target.
    pub progress: PlanningProgress,
    /// The planning's category.
    pub category: Option<categories::Model>,
}

/// Input for creating or updating a planning.
#[derive(Debug, Clone)]
pub struct PlanningInput {
    /// Title.
    pub title: String,
    /// Target amount.
    pub target_amount: Decimal,
    /// Expense or income.
    pub kind: TransactionKind,
    /// Category, must belong to the caller.
    pub category_id: Uuid,
}

impl From<&plannings::Model> for PlanningInfo {
    fn from(model: &plannings::Model) -> Self {
        Self {
            id: model.id,
            title: model.title.clone(),
            target_amount: model.target_amount,
            kind: model.kind.into(),
            category_id: model.category_id,
            created_at: model.created_at.to_utc(),
        }
    }
}

/// Planning repository.
#[derive(Debug, Clone)]
pub struct PlanningRepository {
    db: DatabaseConnection,
}

impl PlanningRepository {
    /// Creates a new planning repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Plannings created within `window`, each with the executed amount of
    /// its linked transactions in the same window.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn list_month(
        &self,
        scope: OwnerScope,
        window: &MonthWindow,
    ) -> Result<Vec<PlanningWithProgress>, DbErr> {
        let rows = scope
            .find::<plannings::Entity>()
            .filter(plannings::Column::CreatedAt.gte(window.start_at()))
            .filter(plannings::Column::CreatedAt.lt(window.end_at()))
            .order_by_asc(plannings::Column::CreatedAt)
            .find_also_related(categories::Entity)
            .all(&self.db)
            .await?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = rows.iter().map(|(p, _)| p.id).collect();
        let linked: Vec<TransactionRecord> = scope
            .find::<transactions::Entity>()
            .filter(transactions::Column::PlanningId.is_in(ids))
            .filter(transactions::Column::Status.eq(TransactionStatus::Executed))
            .filter(transactions::Column::Date.gte(window.start()))
            .filter(transactions::Column::Date.lt(window.end()))
            .all(&self.db)
            .await?
            .iter()
            .map(TransactionRecord::from)
            .collect();

        let (infos, planning_categories): (Vec<PlanningInfo>, Vec<Option<categories::Model>>) = rows
            .iter()
            .map(|(planning, category)| (PlanningInfo::from(planning), category.clone()))
            .unzip();

        Ok(PlanningService::progress(infos, &linked, window)
            .into_iter()
            .zip(planning_categories)
            .map(|(progress, category)| PlanningWithProgress { progress, category })
            .collect())
    }

    /// Plannings of one of the caller's categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_category(
        &self,
        scope: OwnerScope,
        category_id: Uuid,
    ) -> Result<Vec<plannings::Model>, DbErr> {
        scope
            .find::<plannings::Entity>()
            .filter(plannings::Column::CategoryId.eq(category_id))
            .order_by_asc(plannings::Column::Title)
            .all(&self.db)
            .await
    }

    /// Creates a planning.
    ///
    /// # Errors
    ///
    /// Returns an error if the input breaks a planning rule or the
    /// category is not the caller's.
    pub async fn create(
        &self,
        scope: OwnerScope,
        input: PlanningInput,
    ) -> Result<plannings::Model, PlanningError> {
        PlanningService::validate(&input.title, input.target_amount)?;
        self.ensure_category(scope, input.category_id).await?;

        let now = chrono::Utc::now().into();
        let planning = plannings::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(scope.user_id()),
            title: Set(input.title),
            target_amount: Set(input.target_amount),
            kind: Set(input.kind),
            category_id: Set(input.category_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(planning.insert(&self.db).await?)
    }

    /// Updates one of the caller's plannings.
    ///
    /// # Errors
    ///
    /// Returns `PlanningError::NotFound` if it does not exist or is not owned.
    pub async fn update(
        &self,
        scope: OwnerScope,
        id: Uuid,
        input: PlanningInput,
    ) -> Result<plannings::Model, PlanningError> {
        PlanningService::validate(&input.title, input.target_amount)?;

        let existing = scope
            .find_by_id::<plannings::Entity>(id)
            .one(&self.db)
            .await?
            .ok_or(PlanningError::NotFound(id))?;

        if existing.category_id != input.category_id {
            self.ensure_category(scope, input.category_id).await?;
        }

        let mut active: plannings::ActiveModel = existing.into();
        active.title = Set(input.title);
        active.target_amount = Set(input.target_amount);
        active.kind = Set(input.kind);
        active.category_id = Set(input.category_id);
        active.updated_at = Set(chrono::Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    async fn ensure_category(&self, scope: OwnerScope, id: Uuid) -> Result<(), PlanningError> {
        let owned = scope
            .find_by_id::<categories::Entity>(id)
            .count(&self.db)
            .await?;
        if owned == 0 {
            return Err(PlanningError::CategoryNotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase};

    use super::*;

    fn planning(user_id: Uuid, category_id: Uuid) -> plannings::Model {
        let created = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap().into();
        plannings::Model {
            id: Uuid::new_v4(),
            user_id,
            title: "Market".to_string(),
            target_amount: dec!(800),
            kind: TransactionKind::Expense,
            category_id,
            created_at: created,
            updated_at: created,
        }
    }

    fn category(id: Uuid, user_id: Uuid) -> categories::Model {
        let now = Utc::now().into();
        categories::Model {
            id,
            user_id,
            name: "Home".to_string(),
            kind: TransactionKind::Expense,
            icon_code: 1,
            color_code: 1,
            description: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_list_month_without_plannings_skips_transaction_query() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<(plannings::Model, Option<categories::Model>)>::new()])
            .into_connection();
        let repo = PlanningRepository::new(db);

        let window = MonthWindow::new(2026, 3).unwrap();
        let rows = repo
            .list_month(OwnerScope::new(Uuid::new_v4()), &window)
            .await
            .unwrap();

        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_list_month_reports_zero_without_linked_transactions() {
        let user_id = Uuid::new_v4();
        let category_id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![(
                planning(user_id, category_id),
                Some(category(category_id, user_id)),
            )]])
            .append_query_results([Vec::<transactions::Model>::new()])
            .into_connection();
        let repo = PlanningRepository::new(db);

        let window = MonthWindow::new(2026, 3).unwrap();
        let rows = repo.list_month(OwnerScope::new(user_id), &window).await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].progress.executed_amount, Decimal::ZERO);
        assert_eq!(rows[0].progress.remaining_amount, dec!(800));
        assert_eq!(rows[0].category.as_ref().map(|c| c.id), Some(category_id));
    }

    #[tokio::test]
    async fn test_create_rejects_blank_title() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let repo = PlanningRepository::new(db);

        let result = repo
            .create(
                OwnerScope::new(Uuid::new_v4()),
                PlanningInput {
                    title: "  ".to_string(),
                    target_amount: dec!(10),
                    kind: TransactionKind::Expense,
                    category_id: Uuid::new_v4(),
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(PlanningError::Domain(DomainError::EmptyTitle))
        ));
    }
}
