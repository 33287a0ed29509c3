//! Asset routes.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{AppState, error::ApiResult, extractors::ValidatedJson, middleware::AuthUser};
use controlwise_core::portfolio::{AssetInfo, AssetType};
use controlwise_db::{AssetRepository, entities::assets, repositories::CreateAssetInput};

/// Creates the asset routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/assets", get(list_assets).post(create_asset))
}

/// Request body for creating an asset.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAssetRequest {
    /// Exchange ticker, stored upper-case.
    #[validate(length(min = 1, max = 20, message = "Ticker must be 1 to 20 characters"))]
    pub ticker: String,
    /// Display name.
    #[validate(length(min = 1, max = 120, message = "Name is required"))]
    pub name: String,
    /// Asset class.
    pub asset_type: AssetType,
}

/// Asset response.
#[derive(Debug, Serialize)]
pub struct AssetResponse {
    /// Asset id.
    pub id: Uuid,
    /// Exchange ticker.
    pub ticker: String,
    /// Display name.
    pub name: String,
    /// Asset class.
    pub asset_type: AssetType,
}

impl From<assets::Model> for AssetResponse {
    fn from(model: assets::Model) -> Self {
        Self {
            id: model.id,
            ticker: model.ticker,
            name: model.name,
            asset_type: model.asset_type.into(),
        }
    }
}

impl From<AssetInfo> for AssetResponse {
    fn from(info: AssetInfo) -> Self {
        Self {
            id: info.id,
            ticker: info.ticker,
            name: info.name,
            asset_type: info.asset_type,
        }
    }
}

/// GET /assets - The caller's assets, by ticker.
async fn list_assets(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<AssetResponse>>> {
    let rows = AssetRepository::new((*state.db).clone())
        .list(user.scope())
        .await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// POST /assets - Start tracking an asset.
async fn create_asset(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateAssetRequest>,
) -> ApiResult<(StatusCode, Json<AssetResponse>)> {
    let asset = AssetRepository::new((*state.db).clone())
        .create(
            user.scope(),
            CreateAssetInput {
                ticker: payload.ticker,
                name: payload.name.trim().to_string(),
                asset_type: payload.asset_type.into(),
            },
        )
        .await?;

    tracing::info!(user_id = %user.user_id(), ticker = %asset.ticker, "Asset created");
    Ok((StatusCode::CREATED, Json(asset.into())))
}
