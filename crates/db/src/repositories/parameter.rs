//! Parameter repository: the per-user reference year.

use sea_orm::{DatabaseConnection, DbErr, EntityTrait, Set, sea_query::OnConflict};
use uuid::Uuid;

use crate::entities::parameters;
use crate::scope::OwnerScope;

/// Parameter repository.
#[derive(Debug, Clone)]
pub struct ParameterRepository {
    db: DatabaseConnection,
}

impl ParameterRepository {
    /// Creates a new parameter repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns the caller's parameter row, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find(&self, scope: OwnerScope) -> Result<Option<parameters::Model>, DbErr> {
        scope.find::<parameters::Entity>().one(&self.db).await
    }

    /// Returns the caller's reference year, if one was ever stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn reference_year(&self, scope: OwnerScope) -> Result<Option<i32>, DbErr> {
        Ok(self.find(scope).await?.map(|p| p.reference_year))
    }

    /// Stores the caller's reference year, creating the row if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails.
    pub async fn upsert(
        &self,
        scope: OwnerScope,
        reference_year: i32,
    ) -> Result<parameters::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let row = parameters::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(scope.user_id()),
            reference_year: Set(reference_year),
            created_at: Set(now),
            updated_at: Set(now),
        };

        parameters::Entity::insert(row)
            .on_conflict(
                OnConflict::column(parameters::Column::UserId)
                    .update_columns([
                        parameters::Column::ReferenceYear,
                        parameters::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await
    }
}
