use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ApiError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("email already registered")]
    Conflict,

    /// Login lookup miss. Deliberately distinguishable from
    /// `InvalidCredentials` on the wire; the browser client depends on the
    /// two messages, even though the split leaks account existence.
    #[error("user not found")]
    UserNotFound,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("missing bearer token")]
    MissingToken,

    #[error("invalid or expired token")]
    InvalidToken,

    #[error("password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("token signing error: {0}")]
    TokenIssue(jsonwebtoken::errors::Error),

    #[error("database error: {0}")]
    Database(#[from] SqlxError),

    #[error("blocking task error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// JSON body shape shared by every error response: `{"message": ...}`.
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict => (StatusCode::BAD_REQUEST, "User already exists".to_string()),
            ApiError::UserNotFound => (StatusCode::NOT_FOUND, "User not found".to_string()),
            ApiError::InvalidCredentials => {
                (StatusCode::BAD_REQUEST, "Invalid credentials".to_string())
            }
            ApiError::NotFound(resource) => {
                (StatusCode::NOT_FOUND, format!("{resource} not found"))
            }
            ApiError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "Authorization token required".to_string(),
            ),
            ApiError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Invalid or expired token".to_string(),
            ),
            ApiError::Hash(_)
            | ApiError::TokenIssue(_)
            | ApiError::Database(_)
            | ApiError::Join(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };
        (status, Json(ApiErrorBody { message })).into_response()
    }
}
