use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Request-local failures surfaced to the caller as `{"error": "..."}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("User not found.")]
    UserNotFound,

    #[error("User already exists.")]
    UserAlreadyExists,

    #[error("Todo doesn't exists")]
    TodoNotFound,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UserNotFound | ApiError::UserAlreadyExists => StatusCode::BAD_REQUEST,
            ApiError::TodoNotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
