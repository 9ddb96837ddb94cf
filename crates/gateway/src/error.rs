//! Error types for the gateway layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Gateway error types
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Authorization failed: {0}")]
    AuthorizationFailed(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::AuthenticationFailed(_) => StatusCode::UNAUTHORIZED,
            GatewayError::AuthorizationFailed(_) => StatusCode::FORBIDDEN,
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::Conflict(_) => StatusCode::CONFLICT,
            GatewayError::InternalError(_) | GatewayError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_response = json!({
            "error": status.as_str(),
            "message": self.to_string(),
        });

        (status, Json(error_response)).into_response()
    }
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

impl From<alumnet_auth::AuthError> for GatewayError {
    fn from(error: alumnet_auth::AuthError) -> Self {
        use alumnet_auth::AuthError;

        match error {
            AuthError::UserExists => GatewayError::InvalidRequest("User already exists".to_string()),
            AuthError::InvalidCredentials => {
                GatewayError::AuthenticationFailed("Invalid credentials".to_string())
            }
            AuthError::InvalidInput(msg) => GatewayError::InvalidRequest(msg),
            AuthError::SessionNotFound | AuthError::InvalidSession => {
                GatewayError::AuthenticationFailed("Invalid session token".to_string())
            }
            AuthError::SessionExpired => {
                GatewayError::AuthenticationFailed("Session expired".to_string())
            }
            AuthError::Database(e) => GatewayError::DatabaseError(e.to_string()),
            AuthError::Directory(e) => GatewayError::DatabaseError(e.to_string()),
            AuthError::PasswordHash(e) => GatewayError::InternalError(e.to_string()),
        }
    }
}

impl From<alumnet_database::UserError> for GatewayError {
    fn from(error: alumnet_database::UserError) -> Self {
        use alumnet_database::UserError;

        match error {
            UserError::UserNotFound => GatewayError::NotFound("User not found".to_string()),
            UserError::EmailAlreadyExists => {
                GatewayError::InvalidRequest("Email already exists".to_string())
            }
            UserError::InvalidEmail => {
                GatewayError::InvalidRequest("Invalid email format".to_string())
            }
            UserError::Validation(msg) => GatewayError::InvalidRequest(msg),
            UserError::DatabaseError(msg) => GatewayError::DatabaseError(msg),
        }
    }
}

impl From<alumnet_database::RelationError> for GatewayError {
    fn from(error: alumnet_database::RelationError) -> Self {
        use alumnet_database::RelationError;

        match error {
            RelationError::InvalidTarget
            | RelationError::AlreadyFriends
            | RelationError::DuplicateRequest
            | RelationError::AlreadyProcessed => GatewayError::InvalidRequest(error.to_string()),
            RelationError::UserNotFound => GatewayError::NotFound("User not found".to_string()),
            RelationError::RequestNotFound => {
                GatewayError::NotFound("Friend request not found".to_string())
            }
            RelationError::Forbidden => GatewayError::AuthorizationFailed(error.to_string()),
            RelationError::Conflict => GatewayError::Conflict(error.to_string()),
            RelationError::DatabaseError(msg) => GatewayError::DatabaseError(msg),
        }
    }
}

impl From<alumnet_database::MessagingError> for GatewayError {
    fn from(error: alumnet_database::MessagingError) -> Self {
        use alumnet_database::MessagingError;

        match error {
            MessagingError::InvalidTarget | MessagingError::EmptyMessage => {
                GatewayError::InvalidRequest(error.to_string())
            }
            MessagingError::UserNotFound => GatewayError::NotFound("User not found".to_string()),
            MessagingError::ConversationNotFound => {
                GatewayError::NotFound("Conversation not found".to_string())
            }
            MessagingError::NotFriends | MessagingError::Forbidden => {
                GatewayError::AuthorizationFailed(error.to_string())
            }
            MessagingError::DatabaseError(msg) => GatewayError::DatabaseError(msg),
        }
    }
}

impl From<sqlx::Error> for GatewayError {
    fn from(error: sqlx::Error) -> Self {
        GatewayError::DatabaseError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alumnet_database::{MessagingError, RelationError};

    #[test]
    fn test_status_codes_match_taxonomy() {
        let cases: Vec<(GatewayError, StatusCode)> = vec![
            (
                RelationError::InvalidTarget.into(),
                StatusCode::BAD_REQUEST,
            ),
            (
                RelationError::DuplicateRequest.into(),
                StatusCode::BAD_REQUEST,
            ),
            (
                RelationError::AlreadyProcessed.into(),
                StatusCode::BAD_REQUEST,
            ),
            (RelationError::Forbidden.into(), StatusCode::FORBIDDEN),
            (RelationError::RequestNotFound.into(), StatusCode::NOT_FOUND),
            (RelationError::Conflict.into(), StatusCode::CONFLICT),
            (MessagingError::NotFriends.into(), StatusCode::FORBIDDEN),
            (
                MessagingError::ConversationNotFound.into(),
                StatusCode::NOT_FOUND,
            ),
            (MessagingError::EmptyMessage.into(), StatusCode::BAD_REQUEST),
        ];

        for (error, expected) in cases {
            assert_eq!(error.status_code(), expected, "{error}");
        }
    }
}
