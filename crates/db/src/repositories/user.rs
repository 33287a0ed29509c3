//! User repository for account and profile operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{categories, parameters, sea_orm_active_enums::TransactionKind, users};
use super::is_unique_violation;
use crate::scope::OwnerScope;

/// Categories every new account starts with: (name, icon code, color code).
pub const DEFAULT_CATEGORIES: [(&str, i32, i32); 6] = [
    ("Home", 1, 1),
    ("Car", 2, 2),
    ("Education", 3, 3),
    ("Electronics", 4, 4),
    ("Leisure", 5, 5),
    ("Other", 6, 6),
];

/// Error types for user operations.
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    /// Email already registered to another account.
    #[error("User with the same e-mail already exists")]
    EmailTaken(String),

    /// User not found.
    #[error("User not found")]
    NotFound,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a user.
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Argon2 hash; `None` for social-login-only accounts.
    pub password_hash: Option<String>,
}

/// Input for updating a profile.
#[derive(Debug, Clone)]
pub struct UpdateProfileInput {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Phone number, cleared when `None`.
    pub phone: Option<String>,
    /// New password hash; unchanged when `None`.
    pub password_hash: Option<String>,
}

/// User repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
    }

    /// Finds the caller's own user row.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_current(&self, scope: OwnerScope) -> Result<Option<users::Model>, DbErr> {
        scope.find::<users::Entity>().one(&self.db).await
    }

    /// Checks if an email is already registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn email_exists(&self, email: &str) -> Result<bool, DbErr> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    /// Creates a user together with the default categories and a
    /// parameter row for `reference_year`, atomically.
    ///
    /// # Errors
    ///
    /// Returns `UserError::EmailTaken` if the email is registered, or a
    /// database error if any insert fails (nothing is persisted then).
    pub async fn create_with_defaults(
        &self,
        input: CreateUserInput,
        reference_year: i32,
    ) -> Result<users::Model, UserError> {
        if self.email_exists(&input.email).await? {
            return Err(UserError::EmailTaken(input.email));
        }

        let now = chrono::Utc::now().into();
        let user_id = Uuid::new_v4();

        let txn = self.db.begin().await?;

        let user = users::ActiveModel {
            id: Set(user_id),
            name: Set(input.name),
            email: Set(input.email.clone()),
            phone: Set(None),
            password_hash: Set(input.password_hash),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(|e| map_unique_violation(e, &input.email))?;

        let defaults = DEFAULT_CATEGORIES
            .iter()
            .map(|(name, icon_code, color_code)| categories::ActiveModel {
                id: Set(Uuid::new_v4()),
                user_id: Set(user_id),
                name: Set((*name).to_string()),
                kind: Set(TransactionKind::Expense),
                icon_code: Set(*icon_code),
                color_code: Set(*color_code),
                description: Set(None),
                created_at: Set(now),
                updated_at: Set(now),
            });
        categories::Entity::insert_many(defaults).exec(&txn).await?;

        parameters::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            reference_year: Set(reference_year),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(user)
    }

    /// Updates the caller's profile.
    ///
    /// # Errors
    ///
    /// Returns `UserError::NotFound` if the user row is gone,
    /// `UserError::EmailTaken` if another account uses the new email.
    pub async fn update_profile(
        &self,
        scope: OwnerScope,
        input: UpdateProfileInput,
    ) -> Result<users::Model, UserError> {
        let user = self.find_current(scope).await?.ok_or(UserError::NotFound)?;

        if input.email != user.email {
            let taken = users::Entity::find()
                .filter(users::Column::Email.eq(&input.email))
                .filter(users::Column::Id.ne(user.id))
                .count(&self.db)
                .await?;
            if taken > 0 {
                return Err(UserError::EmailTaken(input.email));
            }
        }

        let email = input.email.clone();
        let mut active: users::ActiveModel = user.into();
        active.name = Set(input.name);
        active.email = Set(input.email);
        active.phone = Set(input.phone);
        if let Some(hash) = input.password_hash {
            active.password_hash = Set(Some(hash));
        }
        active.updated_at = Set(chrono::Utc::now().into());

        active
            .update(&self.db)
            .await
            .map_err(|e| map_unique_violation(e, &email))
    }
}

/// Turns a unique-constraint failure on `users.email` into `EmailTaken`.
///
/// Covers the window between the existence check and the write.
fn map_unique_violation(err: DbErr, email: &str) -> UserError {
    if is_unique_violation(&err) {
        UserError::EmailTaken(email.to_string())
    } else {
        UserError::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use sea_orm::{DatabaseBackend, MockDatabase, Value};

    use super::*;

    fn user_model(email: &str) -> users::Model {
        let now = chrono::Utc::now().into();
        users::Model {
            id: Uuid::new_v4(),
            name: "Ana".to_string(),
            email: email.to_string(),
            phone: None,
            password_hash: Some("$argon2id$hash".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_default_categories_are_six_unique_names() {
        let mut names: Vec<&str> = DEFAULT_CATEGORIES.iter().map(|(n, _, _)| *n).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 6);
    }

    #[tokio::test]
    async fn test_find_by_email_returns_row() {
        let expected = user_model("ana@example.com");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![expected.clone()]])
            .into_connection();

        let repo = UserRepository::new(db);
        let found = repo.find_by_email("ana@example.com").await.unwrap();

        assert_eq!(found, Some(expected));
    }

    #[tokio::test]
    async fn test_update_profile_of_missing_user_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<users::Model>::new()])
            .into_connection();

        let repo = UserRepository::new(db);
        let result = repo
            .update_profile(
                OwnerScope::new(Uuid::new_v4()),
                UpdateProfileInput {
                    name: "Ana".to_string(),
                    email: "ana@example.com".to_string(),
                    phone: None,
                    password_hash: None,
                },
            )
            .await;

        assert!(matches!(result, Err(UserError::NotFound)));
    }

    #[tokio::test]
    async fn test_create_with_defaults_rejects_taken_email() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[count_row(1)]])
            .into_connection();

        let repo = UserRepository::new(db);
        let result = repo
            .create_with_defaults(
                CreateUserInput {
                    name: "Ana".to_string(),
                    email: "ana@example.com".to_string(),
                    password_hash: None,
                },
                2026,
            )
            .await;

        assert!(matches!(result, Err(UserError::EmailTaken(email)) if email == "ana@example.com"));
    }

    fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("num_items", Value::BigInt(Some(n)))])
    }
}
