//! API route definitions.

use axum::{Router, middleware};
use serde::Deserialize;
use validator::Validate;

use crate::{AppState, error::ApiError, middleware::auth_middleware};
use controlwise_db::{ParameterRepository, scope::OwnerScope};
use controlwise_shared::types::MonthWindow;

pub mod assets;
pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod goals;
pub mod health;
pub mod movements;
pub mod parameters;
pub mod plannings;
pub mod profile;
pub mod reports;
pub mod transactions;
pub mod wallet;

/// Creates the API router with protected routes that need state for middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Protected routes that require authentication
    let protected_routes = Router::new()
        .merge(profile::routes())
        .merge(parameters::routes())
        .merge(categories::routes())
        .merge(transactions::routes())
        .merge(plannings::routes())
        .merge(goals::routes())
        .merge(assets::routes())
        .merge(movements::routes())
        .merge(wallet::routes())
        .merge(dashboard::routes())
        .merge(reports::routes())
        .layer(middleware::from_fn_with_state(state, auth_middleware));

    // Combine public and protected routes
    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(protected_routes)
}

// ============================================================================
// Shared query parameters
// ============================================================================

/// `?month=` selecting a month of the caller's reference year.
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct MonthQuery {
    /// Month number.
    #[validate(range(min = 1, max = 12, message = "Month must be between 1 and 12"))]
    pub month: u32,
}

/// Resolves `month` against the caller's stored reference year.
///
/// A caller without a parameter row gets 404, since there is no year to
/// anchor the month to.
pub(crate) async fn reference_window(
    state: &AppState,
    scope: OwnerScope,
    month: u32,
) -> Result<MonthWindow, ApiError> {
    let year = reference_year(state, scope).await?;
    Ok(MonthWindow::new(year, month)?)
}

/// The caller's stored reference year.
pub(crate) async fn reference_year(state: &AppState, scope: OwnerScope) -> Result<i32, ApiError> {
    ParameterRepository::new((*state.db).clone())
        .reference_year(scope)
        .await?
        .ok_or_else(|| ApiError::not_found("Reference year not found"))
}
