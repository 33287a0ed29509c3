//! Planning routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{MonthQuery, reference_window, transactions::CategoryBrief};
use crate::{
    AppState,
    error::ApiResult,
    extractors::{ValidatedJson, ValidatedQuery},
    middleware::AuthUser,
};
use controlwise_core::transaction::TransactionKind;
use controlwise_db::{
    PlanningRepository,
    entities::plannings,
    repositories::{PlanningInput, PlanningWithProgress},
};
use controlwise_shared::types::to_fixed;

/// Creates the planning routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/plannings", get(list_plannings).post(create_planning))
        .route("/plannings/by-category", get(list_by_category))
        .route("/plannings/{planning_id}", put(update_planning))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating or updating a planning.
#[derive(Debug, Deserialize, Validate)]
pub struct PlanningRequest {
    /// Title.
    #[validate(length(min = 1, max = 120, message = "Title is required"))]
    pub title: String,
    /// Target amount.
    pub target_amount: Decimal,
    /// Expense or income.
    pub kind: TransactionKind,
    /// Category.
    pub category_id: Uuid,
}

impl From<PlanningRequest> for PlanningInput {
    fn from(request: PlanningRequest) -> Self {
        Self {
            title: request.title.trim().to_string(),
            target_amount: request.target_amount,
            kind: request.kind.into(),
            category_id: request.category_id,
        }
    }
}

/// Query parameters for the by-category listing.
#[derive(Debug, Deserialize, Validate)]
pub struct ByCategoryQuery {
    /// Category to list plannings of.
    pub category_id: Uuid,
}

/// Planning response.
#[derive(Debug, Serialize)]
pub struct PlanningResponse {
    /// Planning id.
    pub id: Uuid,
    /// Title.
    pub title: String,
    /// Target amount, two decimals.
    pub target_amount: String,
    /// Expense or income.
    pub kind: TransactionKind,
    /// Category id.
    pub category_id: Uuid,
    /// Creation time.
    pub created_at: DateTime<FixedOffset>,
}

impl From<plannings::Model> for PlanningResponse {
    fn from(model: plannings::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            target_amount: to_fixed(model.target_amount),
            kind: model.kind.into(),
            category_id: model.category_id,
            created_at: model.created_at,
        }
    }
}

/// Planning progress within a month.
#[derive(Debug, Serialize)]
pub struct PlanningProgressResponse {
    /// Planning id.
    pub id: Uuid,
    /// Title.
    pub title: String,
    /// Expense or income.
    pub kind: TransactionKind,
    /// Target amount, two decimals.
    pub target_amount: String,
    /// Executed amount of linked transactions, two decimals.
    pub executed_amount: String,
    /// Target minus executed, two decimals.
    pub remaining_amount: String,
    /// Planning category.
    pub category: Option<CategoryBrief>,
}

impl From<PlanningWithProgress> for PlanningProgressResponse {
    fn from(row: PlanningWithProgress) -> Self {
        let progress = row.progress;
        Self {
            id: progress.planning.id,
            title: progress.planning.title,
            kind: progress.planning.kind,
            target_amount: to_fixed(progress.planning.target_amount),
            executed_amount: to_fixed(progress.executed_amount),
            remaining_amount: to_fixed(progress.remaining_amount),
            category: row.category.map(CategoryBrief::from),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /plannings?month= - Plannings created in the month with progress.
async fn list_plannings(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedQuery(query): ValidatedQuery<MonthQuery>,
) -> ApiResult<Json<Vec<PlanningProgressResponse>>> {
    let scope = user.scope();
    let window = reference_window(&state, scope, query.month).await?;

    let rows = PlanningRepository::new((*state.db).clone())
        .list_month(scope, &window)
        .await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// GET /plannings/by-category?category_id= - Plannings of one category.
async fn list_by_category(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedQuery(query): ValidatedQuery<ByCategoryQuery>,
) -> ApiResult<Json<Vec<PlanningResponse>>> {
    let rows = PlanningRepository::new((*state.db).clone())
        .list_by_category(user.scope(), query.category_id)
        .await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// POST /plannings - Create a planning.
async fn create_planning(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<PlanningRequest>,
) -> ApiResult<(StatusCode, Json<PlanningResponse>)> {
    let planning = PlanningRepository::new((*state.db).clone())
        .create(user.scope(), payload.into())
        .await?;

    tracing::info!(user_id = %user.user_id(), planning_id = %planning.id, "Planning created");
    Ok((StatusCode::CREATED, Json(planning.into())))
}

/// PUT /plannings/{planning_id} - Update a planning.
async fn update_planning(
    State(state): State<AppState>,
    user: AuthUser,
    Path(planning_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<PlanningRequest>,
) -> ApiResult<Json<PlanningResponse>> {
    let planning = PlanningRepository::new((*state.db).clone())
        .update(user.scope(), planning_id, payload.into())
        .await?;

    Ok(Json(planning.into()))
}
