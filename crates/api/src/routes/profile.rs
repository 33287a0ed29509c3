//! Profile routes.

use axum::{
    Json, Router,
    extract::State,
    routing::{get, put},
};
use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::{
    AppState,
    error::{ApiError, ApiResult},
    extractors::ValidatedJson,
    middleware::AuthUser,
};
use controlwise_core::auth::hash_password;
use controlwise_db::{UserRepository, entities::users, repositories::UpdateProfileInput};
use controlwise_shared::auth::UpdateProfileRequest;

/// Creates the profile routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_profile))
        .route("/profile", put(update_profile))
}

/// Profile response.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    /// User id.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Phone number.
    pub phone: Option<String>,
    /// False for social-login-only accounts.
    pub has_password: bool,
    /// Account creation time.
    pub created_at: DateTime<FixedOffset>,
}

impl From<users::Model> for ProfileResponse {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            has_password: user.password_hash.is_some(),
            created_at: user.created_at,
        }
    }
}

/// GET /me - The caller's profile.
async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<ProfileResponse>> {
    let profile = UserRepository::new((*state.db).clone())
        .find_current(user.scope())
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(profile.into()))
}

/// PUT /profile - Update name, email, phone and optionally the password.
async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<ProfileResponse>> {
    let password_hash = payload.password.as_deref().map(hash_password).transpose()?;

    let updated = UserRepository::new((*state.db).clone())
        .update_profile(
            user.scope(),
            UpdateProfileInput {
                name: payload.name.trim().to_string(),
                email: payload.email.trim().to_lowercase(),
                phone: payload.phone.filter(|p| !p.trim().is_empty()),
                password_hash,
            },
        )
        .await?;

    info!(user_id = %updated.id, "Profile updated");
    Ok(Json(updated.into()))
}
