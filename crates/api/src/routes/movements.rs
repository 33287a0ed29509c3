//! Asset movement routes.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use super::assets::AssetResponse;
use crate::{AppState, error::ApiResult, extractors::ValidatedJson, middleware::AuthUser};
use controlwise_core::portfolio::MovementKind;
use controlwise_db::{
    MovementRepository,
    entities::{asset_movements, assets},
    repositories::{CreateMovementInput, MovementError, MovementWithAsset},
};
use controlwise_shared::types::to_fixed;

/// Creates the movement routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/movements", get(list_movements).post(create_movement))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for recording a movement.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMovementRequest {
    /// Asset moved.
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

/// Movement response.
#[derive(Debug, Serialize)]
pub struct MovementResponse {
    /// Movement id.
    pub id: Uuid,
    /// Buy or sell.
    pub kind: MovementKind,
    /// Units moved.
    pub quantity: Decimal,
    /// Price per unit.
    pub unit_price: Decimal,
    /// Quantity times price, two decimals.
    pub total_value: String,
    /// Trade date.
    pub date: NaiveDate,
    /// Asset moved.
    pub asset: Option<AssetResponse>,
}

impl MovementResponse {
    fn new(model: asset_movements::Model, asset: Option<assets::Model>) -> Self {
        Self {
            id: model.id,
            kind: model.kind.into(),
            quantity: model.quantity.normalize(),
            unit_price: model.unit_price.normalize(),
            total_value: to_fixed(model.quantity * model.unit_price),
            date: model.date,
            asset: asset.map(AssetResponse::from),
        }
    }
}

impl From<MovementWithAsset> for MovementResponse {
    fn from(row: MovementWithAsset) -> Self {
        Self::new(row.movement, row.asset)
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /movements - Every movement of the caller, newest first.
async fn list_movements(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<MovementResponse>>> {
    let rows = MovementRepository::new((*state.db).clone())
        .list(user.scope())
        .await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// POST /movements - Record a buy or a sell; sells are checked against the
/// quantity held.
async fn create_movement(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateMovementRequest>,
) -> ApiResult<(StatusCode, Json<MovementResponse>)> {
    let result = MovementRepository::new((*state.db).clone())
        .record(
            user.scope(),
            CreateMovementInput {
                asset_id: payload.asset_id,
                kind: payload.kind.into(),
                quantity: payload.quantity,
                unit_price: payload.unit_price,
                date: payload.date,
            },
        )
        .await;

    let movement = match result {
        Ok(movement) => movement,
        Err(MovementError::Portfolio(e)) => {
            warn!(
                user_id = %user.user_id(),
                asset_id = %payload.asset_id,
                error = %e,
                "Movement rejected"
            );
            return Err(MovementError::Portfolio(e).into());
        }
        Err(e) => return Err(e.into()),
    };

    info!(
        user_id = %user.user_id(),
        movement_id = %movement.id,
        kind = ?payload.kind,
        "Movement recorded"
    );
    Ok((StatusCode::CREATED, Json(MovementResponse::new(movement, None))))
}
