use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::content::ContentError;
use crate::db::StoreError;
use crate::services::ServiceError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Resource not found")]
    NotFound,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Content error: {0}")]
    Content(#[from] ContentError),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound => AppError::NotFound,
            ServiceError::Store(e) => AppError::Store(e),
            ServiceError::Content(e) => AppError::Content(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Store(e) => {
                tracing::error!("Store error: {:?}", e);
                (StatusCode::BAD_GATEWAY, "Document store error".to_string())
            }
            AppError::Content(e) => {
                tracing::error!("Content error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Content error".to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
