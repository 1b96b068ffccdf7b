use academia_core::error::CoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Error returned by HTTP handlers and extractors.
///
/// Domain failures arrive as [`CoreError`]; the other variants are decided
/// at the HTTP layer. Rendered as `{ "error": ..., "code": ... }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A route or page that does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Core(CoreError::UnknownWidget(_)) | AppError::NotFound(_) => {
                StatusCode::NOT_FOUND
            }
            AppError::Core(CoreError::Validation(_)) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Core(CoreError::Conflict(_)) => StatusCode::CONFLICT,
            AppError::Core(CoreError::Unauthorized(_)) => StatusCode::UNAUTHORIZED,
            AppError::Core(CoreError::Forbidden(_)) => StatusCode::FORBIDDEN,
            AppError::Core(CoreError::Internal(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code for the `code` field.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Core(CoreError::UnknownWidget(_)) | AppError::NotFound(_) => "NOT_FOUND",
            AppError::Core(CoreError::Validation(_)) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Core(CoreError::Conflict(_)) => "CONFLICT",
            AppError::Core(CoreError::Unauthorized(_)) => "UNAUTHORIZED",
            AppError::Core(CoreError::Forbidden(_)) => "FORBIDDEN",
            AppError::Core(CoreError::Internal(_)) => "INTERNAL_ERROR",
        }
    }

    /// Client-facing message. Internal details stay in the log.
    fn public_message(&self) -> String {
        match self {
            AppError::Core(CoreError::UnknownWidget(id)) => format!("Widget '{id}' does not exist"),
            AppError::Core(CoreError::Internal(_)) => "An internal error occurred".to_string(),
            AppError::Core(
                CoreError::Validation(msg)
                | CoreError::Conflict(msg)
                | CoreError::Unauthorized(msg)
                | CoreError::Forbidden(msg),
            ) => msg.clone(),
            AppError::NotFound(msg) | AppError::BadRequest(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Core(CoreError::Internal(detail)) = &self {
            tracing::error!(error = %detail, "Internal error");
        }

        let body = json!({
            "error": self.public_message(),
            "code": self.code(),
        });
        (self.status(), axum::Json(body)).into_response()
    }
}
