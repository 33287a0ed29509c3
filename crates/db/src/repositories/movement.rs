//! Asset movement repository with sell validation.

use chrono::NaiveDate;
use controlwise_core::portfolio::{MovementRecord, PortfolioError, PortfolioService};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{asset_movements, assets, sea_orm_active_enums::MovementKind};
use crate::scope::OwnerScope;

/// Error types for movement operations.
#[derive(Debug, thiserror::Error)]
pub enum MovementError {
    /// Asset not found (or not owned by the caller).
    #[error("Asset not found: {0}")]
    AssetNotFound(Uuid),

    /// Portfolio rule violated (bad quantity/price, or not enough to sell).
    #[error(transparent)]
    Portfolio(#[from] PortfolioError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// A movement together with its asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementWithAsset {
    /// The movement.
    pub movement: asset_movements::Model,
    /// The asset moved.
    pub asset: Option<assets::Model>,
}

/// Input for recording a movement.
#[derive(Debug, Clone)]
pub struct CreateMovementInput {
    /// Asset moved, must belong to the caller.
    pub asset_id: Uuid,
    /// Buy or sell.
    pub kind: MovementKind,
    /// Units moved.
    pub quantity: Decimal,
    /// Price per unit.
    pub unit_price: Decimal,
    /// Trade date.
    pub date: NaiveDate,
}

impl From<&asset_movements::Model> for MovementRecord {
    fn from(model: &asset_movements::Model) -> Self {
        Self {
            id: model.id,
            asset_id: model.asset_id,
            kind: model.kind.into(),
            quantity: model.quantity,
            unit_price: model.unit_price,
            date: model.date,
            created_at: model.created_at.to_utc(),
        }
    }
}

/// Movement repository.
#[derive(Debug, Clone)]
pub struct MovementRepository {
    db: DatabaseConnection,
}

impl MovementRepository {
    /// Creates a new movement repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// All of the caller's movements, newest first, with their assets.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, scope: OwnerScope) -> Result<Vec<MovementWithAsset>, DbErr> {
        let rows = scope
            .find::<asset_movements::Entity>()
            .order_by_desc(asset_movements::Column::Date)
            .order_by_desc(asset_movements::Column::CreatedAt)
            .find_also_related(assets::Entity)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(movement, asset)| MovementWithAsset { movement, asset })
            .collect())
    }

    /// Records a movement.
    ///
    /// The asset row is locked for the duration of the write, so two sells
    /// of the same asset are serialized: the second one sees the first
    /// before checking the available quantity. A rejected sell leaves
    /// nothing behind.
    ///
    /// # Errors
    ///
    /// Returns `MovementError::AssetNotFound` if the asset is not the
    /// caller's, `MovementError::Portfolio` if the quantity or price is not
    /// positive or a sell exceeds the holding.
    pub async fn record(
        &self,
        scope: OwnerScope,
        input: CreateMovementInput,
    ) -> Result<asset_movements::Model, MovementError> {
        PortfolioService::validate_movement(input.quantity, input.unit_price)?;

        let txn = self.db.begin().await?;

        let asset = scope
            .find_by_id::<assets::Entity>(input.asset_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(MovementError::AssetNotFound(input.asset_id))?;

        if input.kind == MovementKind::Sell {
            let history: Vec<MovementRecord> = scope
                .find::<asset_movements::Entity>()
                .filter(asset_movements::Column::AssetId.eq(asset.id))
                .all(&txn)
                .await?
                .iter()
                .map(MovementRecord::from)
                .collect();

            if let Err(e) = PortfolioService::validate_sell(&history, input.quantity) {
                txn.rollback().await?;
                return Err(e.into());
            }
        }

        let movement = asset_movements::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(scope.user_id()),
            asset_id: Set(asset.id),
            kind: Set(input.kind),
            quantity: Set(input.quantity),
            unit_price: Set(input.unit_price),
            date: Set(input.date),
            created_at: Set(chrono::Utc::now().into()),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(movement)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase};

    use super::*;

    fn asset(user_id: Uuid) -> assets::Model {
        let now = chrono::Utc::now().into();
        assets::Model {
            id: Uuid::new_v4(),
            user_id,
            ticker: "VALE3".to_string(),
            name: "Vale".to_string(),
            asset_type: crate::entities::sea_orm_active_enums::AssetType::Stock,
            created_at: now,
            updated_at: now,
        }
    }

    fn movement(
        asset: &assets::Model,
        kind: MovementKind,
        quantity: Decimal,
    ) -> asset_movements::Model {
        asset_movements::Model {
            id: Uuid::new_v4(),
            user_id: asset.user_id,
            asset_id: asset.id,
            kind,
            quantity,
            unit_price: dec!(10),
            date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            created_at: chrono::Utc::now().into(),
        }
    }

    fn sell(asset_id: Uuid, quantity: Decimal) -> CreateMovementInput {
        CreateMovementInput {
            asset_id,
            kind: MovementKind::Sell,
            quantity,
            unit_price: dec!(12),
            date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_sell_without_position_creates_nothing() {
        let user_id = Uuid::new_v4();
        let held = asset(user_id);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![held.clone()]])
            .append_query_results([Vec::<asset_movements::Model>::new()])
            .into_connection();
        let repo = MovementRepository::new(db.clone());

        let result = repo.record(OwnerScope::new(user_id), sell(held.id, dec!(1))).await;

        assert!(matches!(
            result,
            Err(MovementError::Portfolio(PortfolioError::NoPosition))
        ));
        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("FOR UPDATE"));
        assert!(!log.contains("INSERT"));
    }

    #[tokio::test]
    async fn test_sell_above_holding_is_rejected() {
        let user_id = Uuid::new_v4();
        let held = asset(user_id);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![held.clone()]])
            .append_query_results([vec![
                movement(&held, MovementKind::Buy, dec!(10)),
                movement(&held, MovementKind::Sell, dec!(4)),
            ]])
            .into_connection();
        let repo = MovementRepository::new(db);

        let result = repo.record(OwnerScope::new(user_id), sell(held.id, dec!(7))).await;

        assert!(matches!(
            result,
            Err(MovementError::Portfolio(PortfolioError::InsufficientQuantity { available, .. }))
                if available == dec!(6)
        ));
    }

    #[tokio::test]
    async fn test_sell_within_holding_is_recorded() {
        let user_id = Uuid::new_v4();
        let held = asset(user_id);
        let stored = movement(&held, MovementKind::Sell, dec!(6));
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![held.clone()]])
            .append_query_results([vec![movement(&held, MovementKind::Buy, dec!(6))]])
            .append_query_results([vec![stored.clone()]])
            .into_connection();
        let repo = MovementRepository::new(db);

        let recorded = repo
            .record(OwnerScope::new(user_id), sell(held.id, dec!(6)))
            .await
            .unwrap();

        assert_eq!(recorded, stored);
    }

    #[tokio::test]
    async fn test_movement_on_foreign_asset_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<assets::Model>::new()])
            .into_connection();
        let repo = MovementRepository::new(db);
        let asset_id = Uuid::new_v4();

        let result = repo
            .record(OwnerScope::new(Uuid::new_v4()), sell(asset_id, dec!(1)))
            .await;

        assert!(matches!(result, Err(MovementError::AssetNotFound(id)) if id == asset_id));
    }
}
