//! Wallet routes: holdings, equity and evolution.

use axum::{Json, Router, extract::State, routing::get};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{assets::AssetResponse, reference_year};
use crate::{
    AppState,
    error::ApiResult,
    extractors::ValidatedQuery,
    middleware::AuthUser,
};
use controlwise_core::portfolio::{AssetType, Holding, MonthValue, TypeEquity, TypeYearSummary};
use controlwise_db::WalletRepository;
use controlwise_shared::types::to_fixed;

/// Creates the wallet routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/wallet/positions", get(get_positions))
        .route("/wallet/summary", get(get_summary))
        .route("/wallet/evolution", get(get_evolution))
        .route("/wallet/year-summary", get(get_year_summary))
}

// ============================================================================
// Query Parameters
// ============================================================================

/// `?year=` for the year summary.
#[derive(Debug, Deserialize, Validate)]
pub struct YearQuery {
    /// Calendar year.
    #[validate(range(min = 1900, max = 9999, message = "Year must be between 1900 and 9999"))]
    pub year: i32,
}

// ============================================================================
// Response Types
// ============================================================================

/// A held position.
#[derive(Debug, Serialize)]
pub struct PositionResponse {
    /// Asset held.
    pub asset: AssetResponse,
    /// Units held.
    pub quantity: Decimal,
    /// Average cost per unit, two decimals.
    pub average_price: String,
    /// Cost of the units held, two decimals.
    pub total_cost: String,
}

impl From<Holding> for PositionResponse {
    fn from(holding: Holding) -> Self {
        Self {
            asset: holding.asset.into(),
            quantity: holding.quantity.normalize(),
            average_price: to_fixed(holding.average_price),
            total_cost: to_fixed(holding.cost_basis),
        }
    }
}

/// Equity of one asset class.
#[derive(Debug, Serialize)]
pub struct TypeEquityResponse {
    /// Asset class.
    pub asset_type: AssetType,
    /// Net movement value, two decimals.
    pub equity: String,
}

impl From<TypeEquity> for TypeEquityResponse {
    fn from(row: TypeEquity) -> Self {
        Self {
            asset_type: row.asset_type,
            equity: to_fixed(row.equity),
        }
    }
}

/// Running wallet value at the end of a month.
#[derive(Debug, Serialize)]
pub struct MonthValueResponse {
    /// Month number.
    pub month: u32,
    /// English month name.
    pub name: String,
    /// Running total, two decimals.
    pub value: String,
}

impl From<MonthValue> for MonthValueResponse {
    fn from(row: MonthValue) -> Self {
        Self {
            month: row.month,
            name: row.name,
            value: to_fixed(row.value),
        }
    }
}

/// One asset line of the year summary.
#[derive(Debug, Serialize)]
pub struct YearAssetResponse {
    /// Asset.
    pub asset: AssetResponse,
    /// Net units bought in the year.
    pub quantity: Decimal,
    /// Net value, two decimals.
    pub value: String,
}

/// Year summary of one asset class.
#[derive(Debug, Serialize)]
pub struct TypeYearSummaryResponse {
    /// Asset class.
    pub asset_type: AssetType,
    /// Sum of the class' asset values, two decimals.
    pub total_value: String,
    /// Assets of the class.
    pub assets: Vec<YearAssetResponse>,
}

impl From<TypeYearSummary> for TypeYearSummaryResponse {
    fn from(row: TypeYearSummary) -> Self {
        Self {
            asset_type: row.asset_type,
            total_value: to_fixed(row.total_value),
            assets: row
                .assets
                .into_iter()
                .map(|line| YearAssetResponse {
                    asset: line.asset.into(),
                    quantity: line.quantity.normalize(),
                    value: to_fixed(line.value),
                })
                .collect(),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /wallet/positions - Current holdings with average price.
async fn get_positions(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<PositionResponse>>> {
    let holdings = WalletRepository::new((*state.db).clone())
        .positions(user.scope())
        .await?;

    Ok(Json(holdings.into_iter().map(Into::into).collect()))
}

/// GET /wallet/summary - Equity by asset class.
async fn get_summary(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<TypeEquityResponse>>> {
    let rows = WalletRepository::new((*state.db).clone())
        .summary(user.scope())
        .await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// GET /wallet/evolution - Running monthly total over the reference year.
async fn get_evolution(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<MonthValueResponse>>> {
    let scope = user.scope();
    let year = reference_year(&state, scope).await?;

    let months = WalletRepository::new((*state.db).clone())
        .evolution(scope, year)
        .await?;

    Ok(Json(months.into_iter().map(Into::into).collect()))
}

/// GET /wallet/year-summary?year= - Holdings built up in a year, by class.
async fn get_year_summary(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedQuery(query): ValidatedQuery<YearQuery>,
) -> ApiResult<Json<Vec<TypeYearSummaryResponse>>> {
    let rows = WalletRepository::new((*state.db).clone())
        .year_summary(user.scope(), query.year)
        .await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}
