//! Error handling for the API server.
//!
//! Handlers return `ApiResult<T>`. Every repository and domain error
//! converts into [`ApiError`], which renders as
//! `{ "error": CODE, "message": text }` with the matching status code.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use controlwise_core::auth::PasswordError;
use controlwise_db::repositories::{
    AssetError, CategoryError, DashboardError, GoalError, MovementError, PlanningError,
    TransactionError, UserError, WalletError,
};
use controlwise_shared::{AppError, JwtError, types::PeriodError};
use sea_orm::DbErr;

/// API result type alias.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error returned by every handler.
#[derive(Debug)]
pub struct ApiError(pub AppError);

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g. `NOT_FOUND`).
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

impl ApiError {
    /// 400 with a validation message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self(AppError::Validation(message.into()))
    }

    /// 404 with a message.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self(AppError::NotFound(message.into()))
    }

    /// 401 with a message.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self(AppError::Unauthorized(message.into()))
    }

    /// 500 with a message that is logged but never sent.
    pub fn internal(message: impl Into<String>) -> Self {
        Self(AppError::Internal(message.into()))
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = if self.0.is_internal() {
            tracing::error!(error = %self.0, "Request failed");
            "An internal error occurred".to_string()
        } else {
            self.0.message().to_string()
        };

        let body = Json(ErrorResponse {
            error: self.0.error_code().to_string(),
            message,
        });
        (status, body).into_response()
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self(AppError::Database(err.to_string()))
    }
}

impl From<PeriodError> for ApiError {
    fn from(err: PeriodError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::NotSet => {
                Self::unauthorized("This account has no password, sign in with social login")
            }
            other => Self::internal(other.to_string()),
        }
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::EncodingError(msg) => Self::internal(msg),
            JwtError::Expired => Self::unauthorized("Token has expired"),
            JwtError::DecodingError(_) => Self::unauthorized("Invalid or malformed token"),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::EmailTaken(_) => Self(AppError::Conflict(err.to_string())),
            UserError::NotFound => Self::not_found(err.to_string()),
            UserError::Database(e) => e.into(),
        }
    }
}

impl From<CategoryError> for ApiError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::DuplicateName(_) => Self(AppError::Conflict(err.to_string())),
            CategoryError::NotFound(_) => Self::not_found(err.to_string()),
            CategoryError::Database(e) => e.into(),
        }
    }
}

impl From<TransactionError> for ApiError {
    fn from(err: TransactionError) -> Self {
        match err {
            TransactionError::NotFound(_)
            | TransactionError::CategoryNotFound(_)
            | TransactionError::PlanningNotFound(_) => Self::not_found(err.to_string()),
            TransactionError::Domain(e) => Self::validation(e.to_string()),
            TransactionError::Database(e) => e.into(),
        }
    }
}

impl From<PlanningError> for ApiError {
    fn from(err: PlanningError) -> Self {
        match err {
            PlanningError::NotFound(_) | PlanningError::CategoryNotFound(_) => {
                Self::not_found(err.to_string())
            }
            PlanningError::Domain(e) => Self::validation(e.to_string()),
            PlanningError::Database(e) => e.into(),
        }
    }
}

impl From<GoalError> for ApiError {
    fn from(err: GoalError) -> Self {
        match err {
            GoalError::NotFound(_) => Self::not_found(err.to_string()),
            GoalError::DuplicateTitle(_) => Self(AppError::Conflict(err.to_string())),
            GoalError::Domain(e) => Self::validation(e.to_string()),
            GoalError::Database(e) => e.into(),
        }
    }
}

impl From<AssetError> for ApiError {
    fn from(err: AssetError) -> Self {
        match err {
            AssetError::DuplicateTicker(_) => Self(AppError::Conflict(err.to_string())),
            AssetError::Database(e) => e.into(),
        }
    }
}

impl From<MovementError> for ApiError {
    fn from(err: MovementError) -> Self {
        use controlwise_core::portfolio::PortfolioError;

        match err {
            MovementError::AssetNotFound(_) => Self::not_found(err.to_string()),
            MovementError::Portfolio(
                e @ (PortfolioError::NoPosition | PortfolioError::InsufficientQuantity { .. }),
            ) => Self(AppError::BusinessRule(e.to_string())),
            MovementError::Portfolio(e) => Self::validation(e.to_string()),
            MovementError::Database(e) => e.into(),
        }
    }
}

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        match err {
            DashboardError::Period(e) => e.into(),
            DashboardError::Database(e) => e.into(),
        }
    }
}

impl From<WalletError> for ApiError {
    fn from(err: WalletError) -> Self {
        match err {
            WalletError::Period(e) => e.into(),
            WalletError::Database(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use controlwise_core::portfolio::PortfolioError;
    use http_body_util::BodyExt;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    async fn body_of(error: ApiError) -> (StatusCode, ErrorResponse) {
        let response = error.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_insufficient_quantity_is_business_rule() {
        let err: ApiError = MovementError::Portfolio(PortfolioError::InsufficientQuantity {
            requested: dec!(10.5),
            available: dec!(10),
        })
        .into();

        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.error, "BUSINESS_RULE_VIOLATION");
        assert!(body.message.contains("available 10"));
    }

    #[tokio::test]
    async fn test_non_positive_quantity_is_validation() {
        let err: ApiError = MovementError::Portfolio(PortfolioError::NonPositiveQuantity).into();

        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_database_error_hides_details() {
        let err: ApiError = DbErr::Custom("connection refused on 10.0.0.3".to_string()).into();

        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "DATABASE_ERROR");
        assert_eq!(body.message, "An internal error occurred");
    }

    #[tokio::test]
    async fn test_duplicate_title_is_conflict() {
        let err: ApiError = GoalError::DuplicateTitle("Trip".to_string()).into();

        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body.message, "Goal 'Trip' already exists");
    }

    #[tokio::test]
    async fn test_foreign_category_is_not_found() {
        let err: ApiError = TransactionError::CategoryNotFound(Uuid::nil()).into();

        let (status, _) = body_of(err).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_social_login_account_is_unauthorized() {
        let (status, body) = body_of(PasswordError::NotSet.into()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.message.contains("social login"));
    }
}
