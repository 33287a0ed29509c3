//! Account routes: sign-up and sign-in.

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use chrono::{Datelike, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::{AppState, error::ApiError, error::ApiResult, extractors::ValidatedJson};
use controlwise_core::auth::{hash_password, verify_password};
use controlwise_db::{UserRepository, repositories::CreateUserInput};
use controlwise_shared::auth::{SignInRequest, SignUpRequest, TokenResponse};

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(sign_up))
        .route("/auth/signin", post(sign_in))
}

/// Response for a new account.
#[derive(Debug, Serialize)]
pub struct SignUpResponse {
    /// New user id.
    pub user_id: Uuid,
}

/// POST /auth/signup - Create an account with default categories and
/// a parameter row for the current year.
async fn sign_up(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignUpRequest>,
) -> ApiResult<(StatusCode, Json<SignUpResponse>)> {
    let password_hash = hash_password(&payload.password)?;

    let user = UserRepository::new((*state.db).clone())
        .create_with_defaults(
            CreateUserInput {
                name: payload.name.trim().to_string(),
                email: payload.email.trim().to_lowercase(),
                password_hash: Some(password_hash),
            },
            Utc::now().year(),
        )
        .await?;

    info!(user_id = %user.id, "User signed up");
    Ok((StatusCode::CREATED, Json(SignUpResponse { user_id: user.id })))
}

/// POST /auth/signin - Exchange credentials for an access token.
async fn sign_in(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignInRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let email = payload.email.trim().to_lowercase();
    let Some(user) = UserRepository::new((*state.db).clone())
        .find_by_email(&email)
        .await?
    else {
        info!("Sign-in attempt for unknown email");
        return Err(ApiError::unauthorized("Invalid credentials"));
    };

    if !verify_password(&payload.password, user.password_hash.as_deref())? {
        info!(user_id = %user.id, "Sign-in attempt with wrong password");
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let access_token = state.jwt_service.generate_access_token(user.id)?;
    info!(user_id = %user.id, "User signed in");

    Ok(Json(TokenResponse::bearer(
        access_token,
        state.jwt_service.access_token_expires_in(),
    )))
}
