//! Dashboard routes: month and year income/expense views.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use uuid::Uuid;

use super::{MonthQuery, reference_window, reference_year};
use crate::{AppState, error::ApiResult, extractors::ValidatedQuery, middleware::AuthUser};
use controlwise_core::dashboard::{CategorySummary, Figure, MonthOverview, MonthSummary};
use controlwise_core::transaction::TransactionKind;
use controlwise_db::DashboardRepository;
use controlwise_shared::types::to_fixed;

/// Creates the dashboard routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard/month", get(get_month))
        .route("/dashboard/expenses", get(get_expenses))
        .route("/dashboard/categories", get(get_categories))
        .route("/dashboard/year", get(get_year))
}

// ============================================================================
// Response Types
// ============================================================================

/// A total with its change against the previous month.
#[derive(Debug, Serialize)]
pub struct FigureResponse {
    /// Total, two decimals.
    pub total: String,
    /// Percentage change, two decimals; "0.00" without a positive baseline.
    pub change_percent: String,
}

impl From<Figure> for FigureResponse {
    fn from(figure: Figure) -> Self {
        Self {
            total: to_fixed(figure.total),
            change_percent: to_fixed(figure.change_percent),
        }
    }
}

/// Month totals.
#[derive(Debug, Serialize)]
pub struct MonthOverviewResponse {
    /// Executed expenses.
    pub expenses: FigureResponse,
    /// Executed income.
    pub income: FigureResponse,
    /// Income minus expenses.
    pub net: FigureResponse,
}

impl From<MonthOverview> for MonthOverviewResponse {
    fn from(overview: MonthOverview) -> Self {
        Self {
            expenses: overview.expenses.into(),
            income: overview.income.into(),
            net: overview.net.into(),
        }
    }
}

/// Executed total of one category and kind.
#[derive(Debug, Serialize)]
pub struct CategorySummaryResponse {
    /// Category id, absent for uncategorized transactions.
    pub category_id: Option<Uuid>,
    /// Category name.
    pub name: String,
    /// Category color.
    pub color_code: i32,
    /// Expense or income.
    pub kind: TransactionKind,
    /// Total, two decimals.
    pub total: String,
}

impl From<CategorySummary> for CategorySummaryResponse {
    fn from(row: CategorySummary) -> Self {
        Self {
            category_id: row.category_id,
            name: row.name,
            color_code: row.color_code,
            kind: row.kind,
            total: to_fixed(row.total),
        }
    }
}

/// Totals of one month of the year view.
#[derive(Debug, Serialize)]
pub struct MonthSummaryResponse {
    /// Month number.
    pub month: u32,
    /// English month name.
    pub name: String,
    /// Executed expenses, two decimals.
    pub expense: String,
    /// Executed income, two decimals.
    pub income: String,
    /// Income minus expenses, two decimals.
    pub net: String,
}

impl From<MonthSummary> for MonthSummaryResponse {
    fn from(row: MonthSummary) -> Self {
        Self {
            month: row.month,
            name: row.name,
            expense: to_fixed(row.expense),
            income: to_fixed(row.income),
            net: to_fixed(row.net),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /dashboard/month?month= - Expenses, income and net with their changes.
async fn get_month(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedQuery(query): ValidatedQuery<MonthQuery>,
) -> ApiResult<Json<MonthOverviewResponse>> {
    let scope = user.scope();
    let window = reference_window(&state, scope, query.month).await?;

    let overview = DashboardRepository::new((*state.db).clone())
        .month_overview(scope, &window)
        .await?;

    Ok(Json(overview.into()))
}

/// GET /dashboard/expenses?month= - Expense total and change.
async fn get_expenses(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedQuery(query): ValidatedQuery<MonthQuery>,
) -> ApiResult<Json<FigureResponse>> {
    let scope = user.scope();
    let window = reference_window(&state, scope, query.month).await?;

    let figure = DashboardRepository::new((*state.db).clone())
        .expense_overview(scope, &window)
        .await?;

    Ok(Json(figure.into()))
}

/// GET /dashboard/categories?month= - Totals by category, largest first.
async fn get_categories(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedQuery(query): ValidatedQuery<MonthQuery>,
) -> ApiResult<Json<Vec<CategorySummaryResponse>>> {
    let scope = user.scope();
    let window = reference_window(&state, scope, query.month).await?;

    let rows = DashboardRepository::new((*state.db).clone())
        .category_summary(scope, &window)
        .await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// GET /dashboard/year - Twelve months of the reference year.
async fn get_year(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<MonthSummaryResponse>>> {
    let scope = user.scope();
    let year = reference_year(&state, scope).await?;

    let months = DashboardRepository::new((*state.db).clone())
        .year_overview(scope, year)
        .await?;

    Ok(Json(months.into_iter().map(Into::into).collect()))
}
