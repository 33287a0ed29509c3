//! Category repository.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::is_unique_violation;
use crate::entities::{categories, sea_orm_active_enums::TransactionKind};
use crate::scope::OwnerScope;

/// Error types for category operations.
#[derive(Debug, thiserror::Error)]
pub enum CategoryError {
    /// The caller already has a category with this name.
    #[error("Category '{0}' already exists")]
    DuplicateName(String),

    /// Category not found (or not owned by the caller).
    #[error("Category not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a category.
#[derive(Debug, Clone)]
pub struct CreateCategoryInput {
    /// Name, unique per user.
    pub name: String,
    /// Expense or income.
    pub kind: TransactionKind,
    /// Icon code.
    pub icon_code: i32,
    /// Color code.
    pub color_code: i32,
    /// Free text.
    pub description: Option<String>,
}

/// Category repository.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    /// Creates a new category repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists the caller's categories ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, scope: OwnerScope) -> Result<Vec<categories::Model>, DbErr> {
        scope
            .find::<categories::Entity>()
            .order_by_asc(categories::Column::Name)
            .all(&self.db)
            .await
    }

    /// Gets one of the caller's categories.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::NotFound` if it does not exist or is not owned.
    pub async fn get(
        &self,
        scope: OwnerScope,
        id: Uuid,
    ) -> Result<categories::Model, CategoryError> {
        scope
            .find_by_id::<categories::Entity>(id)
            .one(&self.db)
            .await?
            .ok_or(CategoryError::NotFound(id))
    }

    /// Creates a category.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::DuplicateName` if the caller already has a
    /// category with this name.
    pub async fn create(
        &self,
        scope: OwnerScope,
        input: CreateCategoryInput,
    ) -> Result<categories::Model, CategoryError> {
        let existing = scope
            .find::<categories::Entity>()
            .filter(categories::Column::Name.eq(&input.name))
            .count(&self.db)
            .await?;
        if existing > 0 {
            return Err(CategoryError::DuplicateName(input.name));
        }

        let now = chrono::Utc::now().into();
        let name = input.name.clone();
        categories::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(scope.user_id()),
            name: Set(input.name),
            kind: Set(input.kind),
            icon_code: Set(input.icon_code),
            color_code: Set(input.color_code),
            description: Set(input.description),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                CategoryError::DuplicateName(name)
            } else {
                CategoryError::Database(e)
            }
        })
    }

    /// Deletes one of the caller's categories.
    ///
    /// Transactions keep existing with a null category; plannings of the
    /// category are removed with it.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::NotFound` if nothing was deleted.
    pub async fn delete(&self, scope: OwnerScope, id: Uuid) -> Result<(), CategoryError> {
        let result = scope
            .delete_by_id::<categories::Entity>(id)
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(CategoryError::NotFound(id));
        }
        Ok(())
    }

    /// Checks that a category exists and belongs to the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn is_owned(&self, scope: OwnerScope, id: Uuid) -> Result<bool, DbErr> {
        let count = scope
            .find_by_id::<categories::Entity>(id)
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};

    use super::*;

    fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("num_items", Value::BigInt(Some(n)))])
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_name() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[count_row(1)]])
            .into_connection();

        let repo = CategoryRepository::new(db);
        let result = repo
            .create(
                OwnerScope::new(Uuid::new_v4()),
                CreateCategoryInput {
                    name: "Home".to_string(),
                    kind: TransactionKind::Expense,
                    icon_code: 1,
                    color_code: 1,
                    description: None,
                },
            )
            .await;

        assert!(matches!(result, Err(CategoryError::DuplicateName(name)) if name == "Home"));
    }

    #[tokio::test]
    async fn test_delete_of_foreign_category_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = CategoryRepository::new(db);
        let id = Uuid::new_v4();
        let result = repo.delete(OwnerScope::new(Uuid::new_v4()), id).await;

        assert!(matches!(result, Err(CategoryError::NotFound(missing)) if missing == id));
    }

    #[tokio::test]
    async fn test_get_missing_category_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<categories::Model>::new()])
            .into_connection();

        let repo = CategoryRepository::new(db);
        let id = Uuid::new_v4();

        assert!(matches!(
            repo.get(OwnerScope::new(Uuid::new_v4()), id).await,
            Err(CategoryError::NotFound(missing)) if missing == id
        ));
    }
}
