use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid payload: {0}")]
    InvalidPayload(#[from] validator::ValidationErrors),

    #[error("Invalid credentials")]
    Auth,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("Database error: {0}")]
    Persistence(sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Multipart error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    fn kind(&self) -> &'static str {
        match self {
            Error::Config(_) => "config",
            Error::Validation(_) | Error::InvalidPayload(_) => "validation",
            Error::Auth => "auth",
            Error::Unauthenticated => "unauthenticated",
            Error::Forbidden(_) => "forbidden",
            Error::Conflict(_) => "conflict",
            Error::NotFound(_) => "not_found",
            Error::UnsupportedType(_) => "unsupported_type",
            Error::Multipart(err) if err.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                "payload_too_large"
            }
            Error::Multipart(_) => "validation",
            Error::Persistence(_) | Error::Migrate(_) | Error::Io(_) | Error::Internal(_) => {
                "internal"
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let kind = self.kind();
        let (status, error_message) = match self {
            Error::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            Error::InvalidPayload(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Error::Multipart(err) => (err.status(), err.body_text()),
            Error::Auth => (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string()),
            Error::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "Authentication required".to_string(),
            ),
            Error::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            Error::Conflict(msg) => (StatusCode::CONFLICT, msg),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Error::UnsupportedType(msg) => (StatusCode::UNSUPPORTED_MEDIA_TYPE, msg),
            Error::Persistence(err) => {
                tracing::error!(error = %err, "persistence failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error processing the request".to_string(),
                )
            }
            other => {
                tracing::error!(error = %other, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message, "kind": kind }));
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Error::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                Error::Conflict("Record already exists".to_string())
            }
            other => Error::Persistence(other),
        }
    }
}
