//! Wallet repository: positions and portfolio views derived from movements.

use controlwise_core::portfolio::{
    AssetInfo, Holding, MonthValue, MovementRecord, PortfolioService, TypeEquity, TypeYearSummary,
};
use controlwise_shared::types::{PeriodError, year_bounds};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

use crate::entities::{asset_movements, assets};
use crate::scope::OwnerScope;

/// Error types for year-scoped wallet views.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    /// Requested year cannot be represented.
    #[error(transparent)]
    Period(#[from] PeriodError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<&assets::Model> for AssetInfo {
    fn from(model: &assets::Model) -> Self {
        Self {
            id: model.id,
            ticker: model.ticker.clone(),
            name: model.name.clone(),
            asset_type: model.asset_type.into(),
        }
    }
}

/// Wallet repository.
///
/// Nothing here is stored: every view is recomputed from the caller's
/// assets and movements on each call.
#[derive(Debug, Clone)]
pub struct WalletRepository {
    db: DatabaseConnection,
}

impl WalletRepository {
    /// Creates a new wallet repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Currently held assets with quantity and average price.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn positions(&self, scope: OwnerScope) -> Result<Vec<Holding>, DbErr> {
        let (assets, movements) = self.load(scope).await?;
        Ok(PortfolioService::holdings(&assets, &movements))
    }

    /// Equity per asset class.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn summary(&self, scope: OwnerScope) -> Result<Vec<TypeEquity>, DbErr> {
        let (assets, movements) = self.load(scope).await?;
        Ok(PortfolioService::equity_by_type(&assets, &movements))
    }

    /// Running net movement value per month of `year`.
    ///
    /// # Errors
    ///
    /// Returns an error if the year is out of range or the query fails.
    pub async fn evolution(
        &self,
        scope: OwnerScope,
        year: i32,
    ) -> Result<Vec<MonthValue>, WalletError> {
        let movements = self.movements_of_year(scope, year).await?;
        Ok(PortfolioService::evolution(&movements, year))
    }

    /// Assets with positive net quantity in `year`, grouped by class.
    ///
    /// # Errors
    ///
    /// Returns an error if the year is out of range or a query fails.
    pub async fn year_summary(
        &self,
        scope: OwnerScope,
        year: i32,
    ) -> Result<Vec<TypeYearSummary>, WalletError> {
        let assets = self.assets(scope).await?;
        let movements = self.movements_of_year(scope, year).await?;
        Ok(PortfolioService::year_summary(&assets, &movements, year))
    }

    async fn load(
        &self,
        scope: OwnerScope,
    ) -> Result<(Vec<AssetInfo>, Vec<MovementRecord>), DbErr> {
        let assets = self.assets(scope).await?;
        let rows = scope.find::<asset_movements::Entity>().all(&self.db).await?;
        Ok((assets, rows.iter().map(MovementRecord::from).collect()))
    }

    async fn assets(&self, scope: OwnerScope) -> Result<Vec<AssetInfo>, DbErr> {
        Ok(scope
            .find::<assets::Entity>()
            .all(&self.db)
            .await?
            .iter()
            .map(AssetInfo::from)
            .collect())
    }

    /// Movements of the caller dated within `year`.
    async fn movements_of_year(
        &self,
        scope: OwnerScope,
        year: i32,
    ) -> Result<Vec<MovementRecord>, WalletError> {
        let (from, to) = year_bounds(year)?;
        let rows = scope
            .find::<asset_movements::Entity>()
            .filter(asset_movements::Column::Date.gte(from))
            .filter(asset_movements::Column::Date.lt(to))
            .all(&self.db)
            .await?;
        Ok(rows.iter().map(MovementRecord::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use uuid::Uuid;

    use super::*;
    use crate::entities::sea_orm_active_enums::{AssetType, MovementKind};

    #[tokio::test]
    async fn test_positions_from_raw_rows() {
        let user_id = Uuid::new_v4();
        let now = chrono::Utc::now().into();
        let asset = assets::Model {
            id: Uuid::new_v4(),
            user_id,
            ticker: "BTC".to_string(),
            name: "Bitcoin".to_string(),
            asset_type: AssetType::Crypto,
            created_at: now,
            updated_at: now,
        };
        let buy = |quantity, unit_price| asset_movements::Model {
            id: Uuid::new_v4(),
            user_id,
            asset_id: asset.id,
            kind: MovementKind::Buy,
            quantity,
            unit_price,
            date: NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
            created_at: now,
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![asset.clone()]])
            .append_query_results([vec![buy(dec!(0.5), dec!(100)), buy(dec!(1.5), dec!(200))]])
            .into_connection();
        let repo = WalletRepository::new(db);

        let holdings = repo.positions(OwnerScope::new(user_id)).await.unwrap();

        assert_eq!(holdings.len(), 1);
        assert_eq!(holdings[0].asset.ticker, "BTC");
        assert_eq!(holdings[0].quantity, dec!(2.0));
        assert_eq!(holdings[0].average_price, dec!(175.00));
    }

    #[tokio::test]
    async fn test_evolution_filters_movements_by_year_in_sql() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<asset_movements::Model>::new()])
            .into_connection();
        let repo = WalletRepository::new(db.clone());

        let months = repo
            .evolution(OwnerScope::new(Uuid::new_v4()), 2025)
            .await
            .unwrap();
        assert_eq!(months.len(), 12);
        assert!(months.iter().all(|m| m.value.is_zero()));

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("2025-01-01"));
        assert!(log.contains("2026-01-01"));
    }

    #[tokio::test]
    async fn test_year_summary_out_of_range_year_is_rejected_before_movements() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<assets::Model>::new()])
            .into_connection();
        let repo = WalletRepository::new(db.clone());

        let result = repo
            .year_summary(OwnerScope::new(Uuid::new_v4()), 300_000)
            .await;

        assert!(matches!(result, Err(WalletError::Period(_))));
        assert_eq!(db.into_transaction_log().len(), 1);
    }
}
