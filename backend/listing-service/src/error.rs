//! Error types for the listing service.
//!
//! One taxonomy shared by every category: the status code and message for a
//! condition are fixed in a single place, and every handler returns
//! `AppError`.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::Serialize;
use thiserror::Error;

/// Result type for listing-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// A single field-level validation failure, surfaced inside the
/// `{"errors": [...]}` body of a 400 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub msg: String,
    pub param: String,
}

impl FieldError {
    pub fn required(param: &str) -> Self {
        Self {
            msg: format!("{} is required", param),
            param: param.to_string(),
        }
    }
}

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    /// Authentication failure before the request reaches the engine.
    #[error("{0}")]
    Unauthorized(String),

    /// Ownership mismatch on a delete operation. Surfaced as 401 to match
    /// the API contract clients already depend on.
    #[error("User not authorized")]
    NotOwner,

    #[error("{0}")]
    NotFound(String),

    #[error("Post already like")]
    AlreadyLiked,

    #[error("Post has not yet been liked")]
    NotLiked,

    #[error("Comment does not exist")]
    CommentNotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// The shared not-found error for listings. Malformed ids map here too,
    /// so callers cannot distinguish a bad id from a missing document.
    pub fn post_not_found() -> Self {
        AppError::NotFound("Post not found".to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) | AppError::AlreadyLiked | AppError::NotLiked => {
                StatusCode::BAD_REQUEST
            }
            AppError::Unauthorized(_) | AppError::NotOwner => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) | AppError::CommentNotFound => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        match self {
            AppError::Validation(errors) => {
                HttpResponse::build(status).json(serde_json::json!({ "errors": errors }))
            }
            AppError::Database(e) => {
                tracing::error!("database error: {}", e);
                HttpResponse::build(status).json(serde_json::json!({ "msg": "Server error" }))
            }
            AppError::Internal(msg) => {
                tracing::error!("internal error: {}", msg);
                HttpResponse::build(status).json(serde_json::json!({ "msg": "Server error" }))
            }
            other => {
                HttpResponse::build(status).json(serde_json::json!({ "msg": other.to_string() }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::AlreadyLiked.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::NotLiked.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotOwner.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::post_not_found().status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::CommentNotFound.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Validation(vec![]).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Internal("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn test_msg_body_for_like_errors() {
        let resp = AppError::AlreadyLiked.error_response();
        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["msg"], "Post already like");

        let resp = AppError::NotLiked.error_response();
        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["msg"], "Post has not yet been liked");
    }

    #[actix_web::test]
    async fn test_validation_body_lists_fields() {
        let err = AppError::Validation(vec![
            FieldError::required("text"),
            FieldError::required("phone"),
        ]);
        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        let errors = json["errors"].as_array().unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0]["msg"], "text is required");
        assert_eq!(errors[0]["param"], "text");
        assert_eq!(errors[1]["param"], "phone");
    }

    #[actix_web::test]
    async fn test_internal_errors_hide_details() {
        let err = AppError::Internal("connection pool exhausted".to_string());
        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["msg"], "Server error");
    }
}
