//! Parameter routes: the caller's reference year.

use axum::{Json, Router, extract::State, routing::get};
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{AppState, error::ApiResult, extractors::ValidatedJson, middleware::AuthUser};
use controlwise_db::ParameterRepository;

/// Creates the parameter routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/parameters", get(get_parameters).put(update_parameters))
}

/// Reference year payload and response.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ParametersBody {
    /// Year every month-scoped view is anchored to.
    #[validate(range(
        min = 1900,
        max = 9999,
        message = "Reference year must be between 1900 and 9999"
    ))]
    pub reference_year: i32,
}

/// GET /parameters - Stored reference year, or the current year when unset.
async fn get_parameters(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<ParametersBody>> {
    let reference_year = ParameterRepository::new((*state.db).clone())
        .reference_year(user.scope())
        .await?
        .unwrap_or_else(|| Utc::now().year());

    Ok(Json(ParametersBody { reference_year }))
}

/// PUT /parameters - Set the reference year.
async fn update_parameters(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<ParametersBody>,
) -> ApiResult<Json<ParametersBody>> {
    let row = ParameterRepository::new((*state.db).clone())
        .upsert(user.scope(), payload.reference_year)
        .await?;

    tracing::info!(user_id = %user.user_id(), year = row.reference_year, "Reference year updated");
    Ok(Json(ParametersBody {
        reference_year: row.reference_year,
    }))
}
