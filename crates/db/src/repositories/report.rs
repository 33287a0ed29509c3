//! Report repository: transaction listings over a year or a month.

use chrono::NaiveDate;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};

use super::transaction::TransactionWithCategory;
use crate::entities::{categories, sea_orm_active_enums::TransactionKind, transactions};
use crate::scope::OwnerScope;

/// Report repository.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The caller's transactions of `kind` dated in `[from, to)`, oldest
    /// first, regardless of status.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn transactions(
        &self,
        scope: OwnerScope,
        kind: TransactionKind,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<TransactionWithCategory>, DbErr> {
        let rows = scope
            .find::<transactions::Entity>()
            .filter(transactions::Column::Kind.eq(kind))
            .filter(transactions::Column::Date.gte(from))
            .filter(transactions::Column::Date.lt(to))
            .order_by_asc(transactions::Column::Date)
            .order_by_asc(transactions::Column::CreatedAt)
            .find_also_related(categories::Entity)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(transaction, category)| TransactionWithCategory {
                transaction,
                category,
            })
            .collect())
    }
}
