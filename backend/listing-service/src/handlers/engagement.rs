//! Engagement handlers - like/unlike and comment endpoints.
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, FieldError, Result};
use crate::handlers::{parse_category, parse_listing_id};
use crate::middleware::UserId;
use crate::services::EngagementService;

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub text: Option<String>,
}

/// Like a listing
/// PUT /api/{category}/like/{id}
pub async fn like_listing(
    pool: web::Data<PgPool>,
    path: web::Path<(String, String)>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let (category_raw, id_raw) = path.into_inner();
    let category = parse_category(&category_raw)?;
    let listing_id = parse_listing_id(&id_raw)?;

    let service = EngagementService::new((**pool).clone());
    let likes = service.like(category, listing_id, user_id.0).await?;

    Ok(HttpResponse::Ok().json(likes))
}

/// Remove a like
/// PUT /api/{category}/unlike/{id}
pub async fn unlike_listing(
    pool: web::Data<PgPool>,
    path: web::Path<(String, String)>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let (category_raw, id_raw) = path.into_inner();
    let category = parse_category(&category_raw)?;
    let listing_id = parse_listing_id(&id_raw)?;

    let service = EngagementService::new((**pool).clone());
    let likes = service.unlike(category, listing_id, user_id.0).await?;

    Ok(HttpResponse::Ok().json(likes))
}

/// Comment on a listing
/// POST /api/{category}/comment/{id}
pub async fn create_comment(
    pool: web::Data<PgPool>,
    path: web::Path<(String, String)>,
    user_id: UserId,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    let (category_raw, id_raw) = path.into_inner();
    let category = parse_category(&category_raw)?;
    let listing_id = parse_listing_id(&id_raw)?;

    let text = match req.into_inner().text {
        Some(text) if !text.trim().is_empty() => text,
        _ => {
            return Err(AppError::Validation(vec![FieldError {
                msg: "Text is required".to_string(),
                param: "text".to_string(),
            }]))
        }
    };

    let service = EngagementService::new((**pool).clone());
    let comments = service
        .add_comment(category, listing_id, user_id.0, &text)
        .await?;

    Ok(HttpResponse::Ok().json(comments))
}

/// Delete a comment (comment owner only)
/// DELETE /api/{category}/comment/{id}/{comment_id}
pub async fn delete_comment(
    pool: web::Data<PgPool>,
    path: web::Path<(String, String, String)>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let (category_raw, id_raw, comment_id_raw) = path.into_inner();
    let category = parse_category(&category_raw)?;
    let listing_id = parse_listing_id(&id_raw)?;
    let comment_id = Uuid::parse_str(&comment_id_raw).map_err(|_| AppError::CommentNotFound)?;

    let service = EngagementService::new((**pool).clone());
    let comments = service
        .remove_comment(category, listing_id, comment_id, user_id.0)
        .await?;

    Ok(HttpResponse::Ok().json(comments))
}
