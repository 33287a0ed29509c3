//! Goal repository.

use chrono::NaiveDate;
use controlwise_core::goals::{GoalError as DomainError, GoalService};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, sea_query::Expr,
};
use uuid::Uuid;

use super::is_unique_violation;
use crate::entities::goals;
use crate::scope::OwnerScope;

/// Error types for goal operations.
#[derive(Debug, thiserror::Error)]
pub enum GoalError {
    /// Goal not found (or not owned by the caller).
    #[error("Goal not found: {0}")]
    NotFound(Uuid),

    /// The caller already has a goal with this title.
    #[error("Goal '{0}' already exists")]
    DuplicateTitle(String),

    /// Domain rule violated.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating or updating a goal.
#[derive(Debug, Clone)]
pub struct GoalInput {
    /// Title, unique per user.
    pub title: String,
    /// Optional deadline.
    pub deadline: Option<NaiveDate>,
    /// Amount to reach.
    pub target_amount: Decimal,
    /// Amount the goal started from.
    pub initial_amount: Option<Decimal>,
    /// Free text.
    pub description: Option<String>,
}

/// Goal repository.
#[derive(Debug, Clone)]
pub struct GoalRepository {
    db: DatabaseConnection,
}

impl GoalRepository {
    /// Creates a new goal repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Goals whose added amount has not reached the target yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_unfinished(&self, scope: OwnerScope) -> Result<Vec<goals::Model>, DbErr> {
        scope
            .find::<goals::Entity>()
            .filter(
                Expr::col((goals::Entity, goals::Column::AmountAdded))
                    .lt(Expr::col((goals::Entity, goals::Column::TargetAmount))),
            )
            .order_by_asc(goals::Column::Deadline)
            .order_by_asc(goals::Column::Title)
            .all(&self.db)
            .await
    }

    /// Creates a goal with nothing added yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the input breaks a goal rule or the title is taken.
    pub async fn create(
        &self,
        scope: OwnerScope,
        input: GoalInput,
    ) -> Result<goals::Model, GoalError> {
        GoalService::validate(&input.title, input.target_amount, input.initial_amount)?;
        self.ensure_title_free(scope, &input.title, None).await?;

        let now = chrono::Utc::now().into();
        let title = input.title.clone();
        goals::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(scope.user_id()),
            title: Set(input.title),
            deadline: Set(input.deadline),
            target_amount: Set(input.target_amount),
            initial_amount: Set(input.initial_amount),
            amount_added: Set(Decimal::ZERO),
            description: Set(input.description),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| map_unique_violation(e, title))
    }

    /// Updates one of the caller's goals.
    ///
    /// # Errors
    ///
    /// Returns `GoalError::NotFound` if it does not exist or is not owned,
    /// `GoalError::DuplicateTitle` if the new title is taken.
    pub async fn update(
        &self,
        scope: OwnerScope,
        id: Uuid,
        input: GoalInput,
    ) -> Result<goals::Model, GoalError> {
        GoalService::validate(&input.title, input.target_amount, input.initial_amount)?;

        let existing = scope
            .find_by_id::<goals::Entity>(id)
            .one(&self.db)
            .await?
            .ok_or(GoalError::NotFound(id))?;

        if existing.title != input.title {
            self.ensure_title_free(scope, &input.title, Some(id)).await?;
        }

        let title = input.title.clone();
        let mut active: goals::ActiveModel = existing.into();
        active.title = Set(input.title);
        active.deadline = Set(input.deadline);
        active.target_amount = Set(input.target_amount);
        active.initial_amount = Set(input.initial_amount);
        active.description = Set(input.description);
        active.updated_at = Set(chrono::Utc::now().into());

        active
            .update(&self.db)
            .await
            .map_err(|e| map_unique_violation(e, title))
    }

    /// Adds `delta` to a goal's added amount in a single statement.
    ///
    /// Concurrent contributions never lose an update: the increment is
    /// computed by the database, not read back and rewritten.
    ///
    /// # Errors
    ///
    /// Returns `GoalError::Domain` for a negative delta and
    /// `GoalError::NotFound` if the goal is not the caller's.
    pub async fn add_amount(
        &self,
        scope: OwnerScope,
        id: Uuid,
        delta: Decimal,
    ) -> Result<goals::Model, GoalError> {
        let delta = GoalService::validate_contribution(delta)?;

        let updated = scope
            .update_many::<goals::Entity>()
            .col_expr(
                goals::Column::AmountAdded,
                Expr::col(goals::Column::AmountAdded).add(delta),
            )
            .col_expr(goals::Column::UpdatedAt, Expr::value(chrono::Utc::now()))
            .filter(goals::Column::Id.eq(id))
            .exec_with_returning(&self.db)
            .await?;

        updated.into_iter().next().ok_or(GoalError::NotFound(id))
    }

    async fn ensure_title_free(
        &self,
        scope: OwnerScope,
        title: &str,
        except: Option<Uuid>,
    ) -> Result<(), GoalError> {
        let mut query = scope
            .find::<goals::Entity>()
            .filter(goals::Column::Title.eq(title));
        if let Some(id) = except {
            query = query.filter(goals::Column::Id.ne(id));
        }

        if query.count(&self.db).await? > 0 {
            return Err(GoalError::DuplicateTitle(title.to_string()));
        }
        Ok(())
    }
}

fn map_unique_violation(err: DbErr, title: String) -> GoalError {
    if is_unique_violation(&err) {
        GoalError::DuplicateTitle(title)
    } else {
        GoalError::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase};

    use super::*;

    fn goal(user_id: Uuid, amount_added: Decimal) -> goals::Model {
        let now = chrono::Utc::now().into();
        goals::Model {
            id: Uuid::new_v4(),
            user_id,
            title: "Trip".to_string(),
            deadline: None,
            target_amount: dec!(1000),
            initial_amount: None,
            amount_added,
            description: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_add_amount_is_a_single_scoped_update() {
        let user_id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![goal(user_id, dec!(150))]])
            .into_connection();
        let repo = GoalRepository::new(db.clone());

        let updated = repo
            .add_amount(OwnerScope::new(user_id), Uuid::new_v4(), dec!(50))
            .await
            .unwrap();
        assert_eq!(updated.amount_added, dec!(150));

        let log = db.into_transaction_log();
        assert_eq!(log.len(), 1);
        // Debug output escapes the identifier quotes.
        let sql = format!("{:?}", log[0]);
        assert!(sql.contains(r#"\"amount_added\" = \"amount_added\" +"#));
        assert!(sql.contains(r#"\"goals\".\"user_id\" ="#));
        assert!(sql.contains("RETURNING"));
    }

    #[tokio::test]
    async fn test_add_amount_to_foreign_goal_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<goals::Model>::new()])
            .into_connection();
        let repo = GoalRepository::new(db);
        let id = Uuid::new_v4();

        let result = repo
            .add_amount(OwnerScope::new(Uuid::new_v4()), id, dec!(100))
            .await;

        assert!(matches!(result, Err(GoalError::NotFound(missing)) if missing == id));
    }

    #[tokio::test]
    async fn test_negative_delta_is_rejected_without_querying() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let repo = GoalRepository::new(db.clone());

        let result = repo
            .add_amount(OwnerScope::new(Uuid::new_v4()), Uuid::new_v4(), dec!(-1))
            .await;

        assert!(matches!(
            result,
            Err(GoalError::Domain(DomainError::NegativeContribution(_)))
        ));
        assert!(db.into_transaction_log().is_empty());
    }
}
