use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Console with ID {0} not found")]
    ConsoleNotFound(i32),

    #[error("Game with ID {0} not found")]
    GameNotFound(i32),

    #[error("Review with ID {0} not found")]
    ReviewNotFound(i32),

    #[error("Cannot delete console {0}: referenced by games")]
    ConsoleInUse(i32),

    #[error("Cannot delete game {0}: referenced by reviews")]
    GameInUse(i32),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::ConsoleNotFound(_)
            | ApiError::GameNotFound(_)
            | ApiError::ReviewNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::ConsoleInUse(_) | ApiError::GameInUse(_) => {
                (StatusCode::CONFLICT, self.to_string())
            }
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
