//! Transaction routes.

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

use super::{MonthQuery, reference_window};
use crate::{
    AppState,
    error::ApiResult,
    extractors::{ValidatedJson, ValidatedQuery},
    middleware::AuthUser,
};
use controlwise_core::transaction::{TransactionKind, TransactionStatus};
use controlwise_db::{
    TransactionRepository,
    entities::{categories, transactions},
    repositories::{CreateTransactionInput, TransactionWithCategory, UpdateTransactionInput},
};
use controlwise_shared::types::to_fixed;

/// Creates the transaction routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_transactions).post(create_transaction))
        .route("/transactions/{transaction_id}", put(update_transaction))
}

// ============================================================================
// Request Types
// ============================================================================

/// Request body for creating a transaction.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTransactionRequest {
    /// Positive amount.
    pub amount: Decimal,
    /// Free text.
    #[validate(length(max = 255, message = "Description must be at most 255 characters"))]
    pub description: Option<String>,
    /// Expense or income.
    pub kind: TransactionKind,
    /// Booking date.
    pub date: NaiveDate,
    /// Initial status, pending when omitted.
    #[serde(default)]
    pub status: TransactionStatus,
    /// Category.
    pub category_id: Option<Uuid>,
    /// Repeats monthly.
    #[serde(default)]
    pub is_recurring: bool,
    /// Planning the transaction counts towards.
    pub planning_id: Option<Uuid>,
}

/// Request body for updating a transaction.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTransactionRequest {
    /// Positive amount.
    pub amount: Decimal,
    /// Free text.
    #[validate(length(max = 255, message = "Description must be at most 255 characters"))]
    pub description: Option<String>,
    /// Booking date.
    pub date: NaiveDate,
    /// Repeats monthly.
    pub is_recurring: bool,
    /// New status.
    pub status: TransactionStatus,
}

// ============================================================================
// Response Types
// ============================================================================

/// Category data embedded in other responses.
#[derive(Debug, Serialize)]
pub struct CategoryBrief {
    /// Category id.
    pub id: Uuid,
    /// Name.
    pub name: String,
    /// Icon code.
    pub icon_code: i32,
    /// Color code.
    pub color_code: i32,
}

impl From<categories::Model> for CategoryBrief {
    fn from(model: categories::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            icon_code: model.icon_code,
            color_code: model.color_code,
        }
    }
}

/// Transaction response.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    /// Transaction id.
    pub id: Uuid,
    /// Amount, two decimals.
    pub amount: String,
    /// Free text.
    pub description: Option<String>,
    /// Expense or income.
    pub kind: TransactionKind,
    /// Booking date.
    pub date: NaiveDate,
    /// Lifecycle status.
    pub status: TransactionStatus,
    /// Repeats monthly.
    pub is_recurring: bool,
    /// Next occurrence of a recurring transaction.
    pub next_recurrence: Option<NaiveDate>,
    /// Linked planning.
    pub planning_id: Option<Uuid>,
    /// Category id.
    pub category_id: Option<Uuid>,
    /// Category details, included in listings.
    pub category: Option<CategoryBrief>,
}

impl TransactionResponse {
    pub(crate) fn new(model: transactions::Model, category: Option<categories::Model>) -> Self {
        Self {
            id: model.id,
            amount: to_fixed(model.amount),
            description: model.description,
            kind: model.kind.into(),
            date: model.date,
            status: model.status.into(),
            is_recurring: model.is_recurring,
            next_recurrence: model.next_recurrence,
            planning_id: model.planning_id,
            category_id: model.category_id,
            category: category.map(CategoryBrief::from),
        }
    }
}

impl From<TransactionWithCategory> for TransactionResponse {
    fn from(row: TransactionWithCategory) -> Self {
        Self::new(row.transaction, row.category)
    }
}

/// Transactions of one month split by status.
#[derive(Debug, Serialize)]
pub struct MonthTransactionsResponse {
    /// Pending transactions.
    pub scheduled: Vec<TransactionResponse>,
    /// Executed and canceled transactions.
    pub history: Vec<TransactionResponse>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /transactions?month= - Month of the reference year, split into
/// scheduled and history.
async fn list_transactions(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedQuery(query): ValidatedQuery<MonthQuery>,
) -> ApiResult<Json<MonthTransactionsResponse>> {
    let scope = user.scope();
    let window = reference_window(&state, scope, query.month).await?;

    let month = TransactionRepository::new((*state.db).clone())
        .list_month(scope, &window)
        .await?;

    Ok(Json(MonthTransactionsResponse {
        scheduled: month.scheduled.into_iter().map(Into::into).collect(),
        history: month.history.into_iter().map(Into::into).collect(),
    }))
}

/// POST /transactions - Create a transaction.
async fn create_transaction(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateTransactionRequest>,
) -> ApiResult<(StatusCode, Json<TransactionResponse>)> {
    let transaction = TransactionRepository::new((*state.db).clone())
        .create(
            user.scope(),
            CreateTransactionInput {
                amount: payload.amount,
                description: payload.description,
                kind: payload.kind.into(),
                date: payload.date,
                status: payload.status.into(),
                category_id: payload.category_id,
                is_recurring: payload.is_recurring,
                planning_id: payload.planning_id,
            },
        )
        .await?;

    tracing::info!(
        user_id = %user.user_id(),
        transaction_id = %transaction.id,
        "Transaction created"
    );
    Ok((
        StatusCode::CREATED,
        Json(TransactionResponse::new(transaction, None)),
    ))
}

/// PUT /transactions/{transaction_id} - Update a transaction.
async fn update_transaction(
    State(state): State<AppState>,
    user: AuthUser,
    Path(transaction_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateTransactionRequest>,
) -> ApiResult<Json<TransactionResponse>> {
    let transaction = TransactionRepository::new((*state.db).clone())
        .update(
            user.scope(),
            transaction_id,
            UpdateTransactionInput {
                amount: payload.amount,
                description: payload.description,
                date: payload.date,
                is_recurring: payload.is_recurring,
                status: payload.status.into(),
            },
        )
        .await?;

    Ok(Json(TransactionResponse::new(transaction, None)))
}
