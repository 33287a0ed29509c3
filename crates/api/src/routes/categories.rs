//! Category routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{AppState, error::ApiResult, extractors::ValidatedJson, middleware::AuthUser};
use controlwise_core::transaction::TransactionKind;
use controlwise_db::{
    CategoryRepository, entities::categories, repositories::CreateCategoryInput,
};

/// Creates the category routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{category_id}",
            get(get_category).delete(delete_category),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating a category.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    /// Name, unique per user.
    #[validate(length(min = 1, max = 60, message = "Name is required"))]
    pub name: String,
    /// Expense or income.
    pub kind: TransactionKind,
    /// Icon code.
    #[validate(range(min = 0, message = "Icon code must not be negative"))]
    pub icon_code: i32,
    /// Color code.
    #[validate(range(min = 0, message = "Color code must not be negative"))]
    pub color_code: i32,
    /// Free text.
    #[validate(length(max = 255, message = "Description must be at most 255 characters"))]
    pub description: Option<String>,
}

/// Category response.
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    /// Category id.
    pub id: Uuid,
    /// Name.
    pub name: String,
    /// Expense or income.
    pub kind: TransactionKind,
    /// Icon code.
    pub icon_code: i32,
    /// Color code.
    pub color_code: i32,
    /// Free text.
    pub description: Option<String>,
}

impl From<categories::Model> for CategoryResponse {
    fn from(model: categories::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            kind: model.kind.into(),
            icon_code: model.icon_code,
            color_code: model.color_code,
            description: model.description,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /categories - The caller's categories, by name.
async fn list_categories(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<CategoryResponse>>> {
    let rows = CategoryRepository::new((*state.db).clone())
        .list(user.scope())
        .await?;

    Ok(Json(rows.into_iter().map(CategoryResponse::from).collect()))
}

/// POST /categories - Create a category.
async fn create_category(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateCategoryRequest>,
) -> ApiResult<(StatusCode, Json<CategoryResponse>)> {
    let category = CategoryRepository::new((*state.db).clone())
        .create(
            user.scope(),
            CreateCategoryInput {
                name: payload.name.trim().to_string(),
                kind: payload.kind.into(),
                icon_code: payload.icon_code,
                color_code: payload.color_code,
                description: payload.description,
            },
        )
        .await?;

    tracing::info!(user_id = %user.user_id(), category_id = %category.id, "Category created");
    Ok((StatusCode::CREATED, Json(category.into())))
}

/// GET /categories/{category_id} - One of the caller's categories.
async fn get_category(
    State(state): State<AppState>,
    user: AuthUser,
    Path(category_id): Path<Uuid>,
) -> ApiResult<Json<CategoryResponse>> {
    let category = CategoryRepository::new((*state.db).clone())
        .get(user.scope(), category_id)
        .await?;

    Ok(Json(category.into()))
}

/// DELETE /categories/{category_id} - Delete a category; its transactions
/// stay, uncategorized.
async fn delete_category(
    State(state): State<AppState>,
    user: AuthUser,
    Path(category_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    CategoryRepository::new((*state.db).clone())
        .delete(user.scope(), category_id)
        .await?;

    tracing::info!(user_id = %user.user_id(), %category_id, "Category deleted");
    Ok(StatusCode::NO_CONTENT)
}
