//! Authentication types for JWT and account requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// JWT claims for access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: Uuid,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(user_id: Uuid, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.sub
    }
}

/// Sign-up request payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignUpRequest {
    /// Display name.
    #[validate(length(min = 1, max = 120, message = "Name is required"))]
    pub name: String,
    /// User email.
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Sign-in request payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignInRequest {
    /// User email.
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Access token returned after a successful sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Signed access token.
    pub access_token: String,
    /// Token type, always `Bearer`.
    pub token_type: String,
    /// Access token expiration in seconds.
    pub expires_in: i64,
}

impl TokenResponse {
    /// Creates a bearer token response.
    #[must_use]
    pub fn bearer(access_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}

/// Profile update payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    /// New display name.
    #[validate(length(min = 1, max = 120, message = "Name is required"))]
    pub name: String,
    /// New email.
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    /// New phone number.
    #[validate(length(max = 30, message = "Phone must be at most 30 characters"))]
    pub phone: Option<String>,
    /// New password, unchanged when absent.
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_claims_new_sets_correct_fields() {
        let user_id = Uuid::new_v4();
        let expires_at = Utc::now() + Duration::days(5);

        let claims = Claims::new(user_id, expires_at);

        assert_eq!(claims.user_id(), user_id);
        assert!(claims.iat <= Utc::now().timestamp());
        assert_eq!(claims.exp, expires_at.timestamp());
    }

    #[test]
    fn test_sign_up_rejects_short_password() {
        let request = SignUpRequest {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "12345".to_string(),
        };

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_sign_up_rejects_invalid_email() {
        let request = SignUpRequest {
            name: "Ana".to_string(),
            email: "not-an-email".to_string(),
            password: "123456".to_string(),
        };

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_profile_update_allows_missing_password() {
        let request = UpdateProfileRequest {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            phone: None,
            password: None,
        };

        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_token_response_is_bearer() {
        let response = TokenResponse::bearer("abc".to_string(), 60);
        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, 60);
    }
}
