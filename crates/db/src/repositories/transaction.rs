//! Transaction repository for income and expense records.

use chrono::NaiveDate;
use controlwise_core::transaction::{
    TransactionError as DomainError, TransactionRecord, next_recurrence,
};
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

/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Transaction not found (or not owned by the caller).
    #[error("Transaction not found: {0}")]
    NotFound(Uuid),

    /// Referenced category is missing or belongs to someone else.
    #[error("Category not found: {0}")]
    CategoryNotFound(Uuid),

    /// Referenced planning is missing or belongs to someone else.
    #[error("Planning not found: {0}")]
    PlanningNotFound(Uuid),

    /// Domain rule violated.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// A transaction with its category, if the category still exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionWithCategory {
    /// The transaction.
    pub transaction: transactions::Model,
    /// Its category.
    pub category: Option<categories::Model>,
}

/// Transactions of one month split by status.
#[derive(Debug, Clone, Default)]
pub struct MonthTransactions {
    /// Pending transactions.
    pub scheduled: Vec<TransactionWithCategory>,
    /// Executed and canceled transactions.
    pub history: Vec<TransactionWithCategory>,
}

/// Input for creating a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    /// Positive amount.
    pub amount: Decimal,
    /// Free text.
    pub description: Option<String>,
    /// Expense or income.
    pub kind: TransactionKind,
    /// Booking date.
    pub date: NaiveDate,
    /// Initial status.
    pub status: TransactionStatus,
    /// Category, must belong to the caller.
    pub category_id: Option<Uuid>,
    /// Whether the transaction repeats monthly.
    pub is_recurring: bool,
    /// Planning, must belong to the caller.
    pub planning_id: Option<Uuid>,
}

/// Input for updating a transaction.
#[derive(Debug, Clone)]
pub struct UpdateTransactionInput {
    /// Positive amount.
    pub amount: Decimal,
    /// Free text.
    pub description: Option<String>,
    /// Booking date.
    pub date: NaiveDate,
    /// Whether the transaction repeats monthly.
    pub is_recurring: bool,
    /// New status.
    pub status: TransactionStatus,
}

impl From<&transactions::Model> for TransactionRecord {
    fn from(model: &transactions::Model) -> Self {
        Self {
            id: model.id,
            amount: model.amount,
            kind: model.kind.into(),
            status: model.status.into(),
            date: model.date,
            category_id: model.category_id,
            planning_id: model.planning_id,
        }
    }
}

/// Transaction repository.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists the caller's transactions of `window`, newest first, split
    /// into scheduled and history.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_month(
        &self,
        scope: OwnerScope,
        window: &MonthWindow,
    ) -> Result<MonthTransactions, DbErr> {
        let rows = scope
            .find::<transactions::Entity>()
            .filter(transactions::Column::Date.gte(window.start()))
            .filter(transactions::Column::Date.lt(window.end()))
            .order_by_desc(transactions::Column::Date)
            .order_by_desc(transactions::Column::CreatedAt)
            .find_also_related(categories::Entity)
            .all(&self.db)
            .await?;

        let (scheduled, history) = rows
            .into_iter()
            .map(|(transaction, category)| TransactionWithCategory {
                transaction,
                category,
            })
            .partition(|t| t.transaction.status == TransactionStatus::Pending);

        Ok(MonthTransactions { scheduled, history })
    }

    /// Executed transactions of the caller dated in `[from, to)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn executed_between(
        &self,
        scope: OwnerScope,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<TransactionRecord>, DbErr> {
        let rows = scope
            .find::<transactions::Entity>()
            .filter(transactions::Column::Status.eq(TransactionStatus::Executed))
            .filter(transactions::Column::Date.gte(from))
            .filter(transactions::Column::Date.lt(to))
            .all(&self.db)
            .await?;

        Ok(rows.iter().map(TransactionRecord::from).collect())
    }

    /// Creates a transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is not positive, or if the category
    /// or planning is not the caller's.
    pub async fn create(
        &self,
        scope: OwnerScope,
        input: CreateTransactionInput,
    ) -> Result<transactions::Model, TransactionError> {
        TransactionRecord::validate_amount(input.amount)?;

        if let Some(category_id) = input.category_id {
            let owned = scope
                .find_by_id::<categories::Entity>(category_id)
                .count(&self.db)
                .await?;
            if owned == 0 {
                return Err(TransactionError::CategoryNotFound(category_id));
            }
        }

        if let Some(planning_id) = input.planning_id {
            let owned = scope
                .find_by_id::<plannings::Entity>(planning_id)
                .count(&self.db)
                .await?;
            if owned == 0 {
                return Err(TransactionError::PlanningNotFound(planning_id));
            }
        }

        let now = chrono::Utc::now().into();
        let transaction = transactions::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(scope.user_id()),
            amount: Set(input.amount),
            description: Set(input.description),
            kind: Set(input.kind),
            date: Set(input.date),
            status: Set(input.status),
            category_id: Set(input.category_id),
            is_recurring: Set(input.is_recurring),
            next_recurrence: Set(next_recurrence(input.date, input.is_recurring)?),
            planning_id: Set(input.planning_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(transaction.insert(&self.db).await?)
    }

    /// Updates one of the caller's transactions.
    ///
    /// The next occurrence is recomputed from the new date, and cleared
    /// when recurrence is switched off.
    ///
    /// # Errors
    ///
    /// Returns `TransactionError::NotFound` if it does not exist or is not owned.
    pub async fn update(
        &self,
        scope: OwnerScope,
        id: Uuid,
        input: UpdateTransactionInput,
    ) -> Result<transactions::Model, TransactionError> {
        TransactionRecord::validate_amount(input.amount)?;

        let existing = scope
            .find_by_id::<transactions::Entity>(id)
            .one(&self.db)
            .await?
            .ok_or(TransactionError::NotFound(id))?;

        let mut active: transactions::ActiveModel = existing.into();
        active.amount = Set(input.amount);
        active.description = Set(input.description);
        active.date = Set(input.date);
        active.is_recurring = Set(input.is_recurring);
        active.next_recurrence = Set(next_recurrence(input.date, input.is_recurring)?);
        active.status = Set(input.status);
        active.updated_at = Set(chrono::Utc::now().into());

        Ok(active.update(&self.db).await?)
    }
}
