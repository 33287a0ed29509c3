//! Goal routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{AppState, error::ApiResult, extractors::ValidatedJson, middleware::AuthUser};
use controlwise_core::goals::GoalService;
use controlwise_db::{GoalRepository, entities::goals, repositories::GoalInput};
use controlwise_shared::types::{to_fixed, to_fixed_opt};

/// Creates the goal routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/goals", get(list_goals).post(create_goal))
        .route("/goals/{goal_id}", put(update_goal))
        .route("/goals/{goal_id}/amount", put(add_amount))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating or updating a goal.
#[derive(Debug, Deserialize, Validate)]
pub struct GoalRequest {
    /// Title, unique per user.
    #[validate(length(min = 1, max = 120, message = "Title is required"))]
    pub title: String,
    /// Optional deadline.
    pub deadline: Option<NaiveDate>,
    /// Amount to reach.
    pub target_amount: Decimal,
    /// Amount the goal starts from.
    pub initial_amount: Option<Decimal>,
    /// Free text.
    #[validate(length(max = 255, message = "Description must be at most 255 characters"))]
    pub description: Option<String>,
}

impl From<GoalRequest> for GoalInput {
    fn from(request: GoalRequest) -> Self {
        Self {
            title: request.title.trim().to_string(),
            deadline: request.deadline,
            target_amount: request.target_amount,
            initial_amount: request.initial_amount,
            description: request.description,
        }
    }
}

/// Request body for a contribution.
#[derive(Debug, Deserialize, Validate)]
pub struct AddAmountRequest {
    /// Amount to add, never negative.
    pub amount: Decimal,
}

/// Goal response.
#[derive(Debug, Serialize)]
pub struct GoalResponse {
    /// Goal id.
    pub id: Uuid,
    /// Title.
    pub title: String,
    /// Optional deadline.
    pub deadline: Option<NaiveDate>,
    /// Amount to reach, two decimals.
    pub target_amount: String,
    /// Starting amount, two decimals.
    pub initial_amount: String,
    /// Contributions so far, two decimals.
    pub amount_added: String,
    /// Still missing, two decimals.
    pub remaining_amount: String,
    /// Whether the target is reached.
    pub finished: bool,
    /// Free text.
    pub description: Option<String>,
}

impl From<goals::Model> for GoalResponse {
    fn from(model: goals::Model) -> Self {
        let status = GoalService::status(model.amount_added, model.target_amount);
        Self {
            id: model.id,
            title: model.title,
            deadline: model.deadline,
            target_amount: to_fixed(status.target_amount),
            initial_amount: to_fixed_opt(model.initial_amount),
            amount_added: to_fixed(status.amount_added),
            remaining_amount: to_fixed(status.remaining_amount),
            finished: status.finished,
            description: model.description,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /goals - Goals that have not reached their target.
async fn list_goals(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<GoalResponse>>> {
    let rows = GoalRepository::new((*state.db).clone())
        .list_unfinished(user.scope())
        .await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// POST /goals - Create a goal.
async fn create_goal(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<GoalRequest>,
) -> ApiResult<(StatusCode, Json<GoalResponse>)> {
    let goal = GoalRepository::new((*state.db).clone())
        .create(user.scope(), payload.into())
        .await?;

    tracing::info!(user_id = %user.user_id(), goal_id = %goal.id, "Goal created");
    Ok((StatusCode::CREATED, Json(goal.into())))
}

/// PUT /goals/{goal_id} - Update a goal.
async fn update_goal(
    State(state): State<AppState>,
    user: AuthUser,
    Path(goal_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<GoalRequest>,
) -> ApiResult<Json<GoalResponse>> {
    let goal = GoalRepository::new((*state.db).clone())
        .update(user.scope(), goal_id, payload.into())
        .await?;

    Ok(Json(goal.into()))
}

/// PUT /goals/{goal_id}/amount - Atomically add to a goal.
async fn add_amount(
    State(state): State<AppState>,
    user: AuthUser,
    Path(goal_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<AddAmountRequest>,
) -> ApiResult<Json<GoalResponse>> {
    let goal = GoalRepository::new((*state.db).clone())
        .add_amount(user.scope(), goal_id, payload.amount)
        .await?;

    tracing::info!(
        user_id = %user.user_id(),
        %goal_id,
        amount = %payload.amount,
        "Goal contribution added"
    );
    Ok(Json(goal.into()))
}
