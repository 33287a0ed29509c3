//! Report routes.

use axum::{Json, Router, extract::State, routing::get};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::transactions::TransactionResponse;
use crate::{AppState, error::ApiResult, extractors::ValidatedQuery, middleware::AuthUser};
use controlwise_core::transaction::TransactionKind;
use controlwise_db::ReportRepository;
use controlwise_shared::types::{MonthWindow, to_fixed, year_bounds};

/// Creates the report routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/reports", get(get_report))
}

/// Query parameters for a transaction report.
#[derive(Debug, Deserialize, Validate)]
pub struct ReportQuery {
    /// Expense or income.
    pub kind: TransactionKind,
    /// Calendar year.
    #[validate(range(min = 1900, max = 9999, message = "Year must be between 1900 and 9999"))]
    pub year: i32,
    /// Single month of the year; the whole year when absent.
    #[validate(range(min = 1, max = 12, message = "Month must be between 1 and 12"))]
    pub month: Option<u32>,
}

/// Transaction report.
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    /// Expense or income.
    pub kind: TransactionKind,
    /// Sum of every listed amount, two decimals.
    pub total: String,
    /// Transactions, oldest first.
    pub transactions: Vec<TransactionResponse>,
}

/// GET /reports?kind=&year=&month= - Transactions of a kind in a year or month.
async fn get_report(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedQuery(query): ValidatedQuery<ReportQuery>,
) -> ApiResult<Json<ReportResponse>> {
    let (from, to) = match query.month {
        Some(month) => {
            let window = MonthWindow::new(query.year, month)?;
            (window.start(), window.end())
        }
        None => year_bounds(query.year)?,
    };

    let rows = ReportRepository::new((*state.db).clone())
        .transactions(user.scope(), query.kind.into(), from, to)
        .await?;

    let total = rows.iter().map(|row| row.transaction.amount).sum();
    Ok(Json(ReportResponse {
        kind: query.kind,
        total: to_fixed(total),
        transactions: rows.into_iter().map(Into::into).collect(),
    }))
}
