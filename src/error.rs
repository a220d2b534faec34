use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;
use validator::ValidationErrors;

use crate::db::DatabaseError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Validation error")]
    Validation(#[from] ValidationErrors),

    #[error("Request failed: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::Database(err) => match err {
                DatabaseError::TenantNotFound { .. } => {
                    (StatusCode::NOT_FOUND, Value::String(err.to_string()))
                }
                DatabaseError::NotFound => (StatusCode::NOT_FOUND, Value::String(err.to_string())),
                DatabaseError::Duplicate => {
                    (StatusCode::BAD_REQUEST, Value::String(err.to_string()))
                }
                DatabaseError::Sqlx(inner) => {
                    tracing::error!("Unhandled database error: {inner}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Value::String(format!("Request failed: {inner}")),
                    )
                }
            },
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, Value::String(msg.clone())),
            AppError::Conflict(msg) => (StatusCode::BAD_REQUEST, Value::String(msg.clone())),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, Value::String(msg.clone())),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, Value::String(msg.clone())),
            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                serde_json::to_value(errors)
                    .unwrap_or_else(|_| Value::String("Invalid request".to_string())),
            ),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Value::String(self.to_string()),
                )
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn tenant_not_found_maps_to_404_with_host_in_detail() {
        let err = AppError::Database(DatabaseError::TenantNotFound {
            host: "ghost.example.com".to_string(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert!(body["detail"]
            .as_str()
            .unwrap()
            .contains("ghost.example.com"));
    }

    #[tokio::test]
    async fn conflict_maps_to_400_with_verbatim_detail() {
        let err = AppError::Conflict("Invalid emailId. Reason - Already exists!".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["detail"], "Invalid emailId. Reason - Already exists!");
    }

    #[tokio::test]
    async fn unauthorized_maps_to_401() {
        let err = AppError::Unauthorized("Incorrect password provided".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(response).await;
        assert_eq!(body["detail"], "Incorrect password provided");
    }

    #[tokio::test]
    async fn validation_maps_to_422_with_structured_detail() {
        let mut errors = ValidationErrors::new();
        errors.add("email", validator::ValidationError::new("email"));

        let response = AppError::Validation(errors).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        assert!(body["detail"]["email"].is_array());
    }

    #[tokio::test]
    async fn internal_maps_to_500_with_request_failed_prefix() {
        let response = AppError::Internal("connection refused".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert!(body["detail"]
            .as_str()
            .unwrap()
            .starts_with("Request failed:"));
    }
}
