//! `SeaORM` active enums mapped to `PostgreSQL` enum types.

use controlwise_core::portfolio::{AssetType as CoreAssetType, MovementKind as CoreMovementKind};
use controlwise_core::transaction::{
    TransactionKind as CoreTransactionKind, TransactionStatus as CoreTransactionStatus,
};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_kind")]
pub enum TransactionKind {
    #[sea_orm(string_value = "EXPENSE")]
    Expense,
    #[sea_orm(string_value = "INCOME")]
    Income,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_status")]
pub enum TransactionStatus {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "EXECUTED")]
    Executed,
    #[sea_orm(string_value = "CANCELED")]
    Canceled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "asset_type")]
pub enum AssetType {
    #[sea_orm(string_value = "STOCK")]
    Stock,
    #[sea_orm(string_value = "REIT")]
    Reit,
    #[sea_orm(string_value = "CRYPTO")]
    Crypto,
    #[sea_orm(string_value = "BDR")]
    Bdr,
    #[sea_orm(string_value = "ETF")]
    Etf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "movement_kind")]
pub enum MovementKind {
    #[sea_orm(string_value = "BUY")]
    Buy,
    #[sea_orm(string_value = "SELL")]
    Sell,
}

// ============================================================================
// Conversions to and from the domain enums
// ============================================================================

impl From<TransactionKind> for CoreTransactionKind {
    fn from(value: TransactionKind) -> Self {
        match value {
            TransactionKind::Expense => Self::Expense,
            TransactionKind::Income => Self::Income,
        }
    }
}

impl From<CoreTransactionKind> for TransactionKind {
    fn from(value: CoreTransactionKind) -> Self {
        match value {
            CoreTransactionKind::Expense => Self::Expense,
            CoreTransactionKind::Income => Self::Income,
        }
    }
}

impl From<TransactionStatus> for CoreTransactionStatus {
    fn from(value: TransactionStatus) -> Self {
        match value {
            TransactionStatus::Pending => Self::Pending,
            TransactionStatus::Executed => Self::Executed,
            TransactionStatus::Canceled => Self::Canceled,
        }
    }
}

impl From<CoreTransactionStatus> for TransactionStatus {
    fn from(value: CoreTransactionStatus) -> Self {
        match value {
            CoreTransactionStatus::Pending => Self::Pending,
            CoreTransactionStatus::Executed => Self::Executed,
            CoreTransactionStatus::Canceled => Self::Canceled,
        }
    }
}

impl From<AssetType> for CoreAssetType {
    fn from(value: AssetType) -> Self {
        match value {
            AssetType::Stock => Self::Stock,
            AssetType::Reit => Self::Reit,
            AssetType::Crypto => Self::Crypto,
            AssetType::Bdr => Self::Bdr,
            AssetType::Etf => Self::Etf,
        }
    }
}

impl From<CoreAssetType> for AssetType {
    fn from(value: CoreAssetType) -> Self {
        match value {
            CoreAssetType::Stock => Self::Stock,
            CoreAssetType::Reit => Self::Reit,
            CoreAssetType::Crypto => Self::Crypto,
            CoreAssetType::Bdr => Self::Bdr,
            CoreAssetType::Etf => Self::Etf,
        }
    }
}

impl From<MovementKind> for CoreMovementKind {
    fn from(value: MovementKind) -> Self {
        match value {
            MovementKind::Buy => Self::Buy,
            MovementKind::Sell => Self::Sell,
        }
    }
}

impl From<CoreMovementKind> for MovementKind {
    fn from(value: CoreMovementKind) -> Self {
        match value {
            CoreMovementKind::Buy => Self::Buy,
            CoreMovementKind::Sell => Self::Sell,
        }
    }
}
