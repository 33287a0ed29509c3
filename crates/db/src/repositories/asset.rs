//! Asset repository.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::is_unique_violation;
use crate::entities::{assets, sea_orm_active_enums::AssetType};
use crate::scope::OwnerScope;

/// Error types for asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// The caller already tracks this ticker.
    #[error("Asset '{0}' already exists")]
    DuplicateTicker(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an asset.
#[derive(Debug, Clone)]
pub struct CreateAssetInput {
    /// Ticker symbol, unique per user.
    pub ticker: String,
    /// Display name.
    pub name: String,
    /// Asset class.
    pub asset_type: AssetType,
}

/// Asset repository.
#[derive(Debug, Clone)]
pub struct AssetRepository {
    db: DatabaseConnection,
}

impl AssetRepository {
    /// Creates a new asset repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists the caller's assets by ticker.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, scope: OwnerScope) -> Result<Vec<assets::Model>, DbErr> {
        scope
            .find::<assets::Entity>()
            .order_by_asc(assets::Column::Ticker)
            .all(&self.db)
            .await
    }

    /// Creates an asset. Tickers are stored upper-case.
    ///
    /// # Errors
    ///
    /// Returns `AssetError::DuplicateTicker` if the caller already has it.
    pub async fn create(
        &self,
        scope: OwnerScope,
        input: CreateAssetInput,
    ) -> Result<assets::Model, AssetError> {
        let ticker = input.ticker.trim().to_uppercase();

        let existing = scope
            .find::<assets::Entity>()
            .filter(assets::Column::Ticker.eq(&ticker))
            .count(&self.db)
            .await?;
        if existing > 0 {
            return Err(AssetError::DuplicateTicker(ticker));
        }

        let now = chrono::Utc::now().into();
        assets::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(scope.user_id()),
            ticker: Set(ticker.clone()),
            name: Set(input.name),
            asset_type: Set(input.asset_type),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AssetError::DuplicateTicker(ticker)
            } else {
                AssetError::Database(e)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use sea_orm::{DatabaseBackend, MockDatabase, Value};

    use super::*;

    #[tokio::test]
    async fn test_create_normalizes_ticker_before_duplicate_check() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[BTreeMap::from([(
                "num_items",
                Value::BigInt(Some(1)),
            )])]])
            .into_connection();
        let repo = AssetRepository::new(db);

        let result = repo
            .create(
                OwnerScope::new(Uuid::new_v4()),
                CreateAssetInput {
                    ticker: " petr4 ".to_string(),
                    name: "Petrobras".to_string(),
                    asset_type: AssetType::Stock,
                },
            )
            .await;

        assert!(matches!(result, Err(AssetError::DuplicateTicker(t)) if t == "PETR4"));
    }
}
