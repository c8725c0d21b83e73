//! Listing handlers - HTTP endpoints for creating, reading and deleting
//! listings.
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use std::collections::BTreeMap;

use crate::error::{AppError, FieldError, Result};
use crate::handlers::{parse_category, parse_listing_id};
use crate::middleware::UserId;
use crate::models::{Category, NewListing};
use crate::services::ListingService;

#[derive(Debug, Deserialize)]
pub struct CreateListingRequest {
    pub text: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image: Option<String>,
    pub price: Option<String>,
    /// Category-specific tags arrive flat in the body (e.g. `nganhNghe`
    /// for jobs), not nested under a separate key.
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl CreateListingRequest {
    /// Collect every missing required field before failing, so the client
    /// sees the full list in one response.
    fn validate(self, category: Category) -> Result<NewListing> {
        let mut errors = Vec::new();
        for (value, param) in [
            (&self.text, "text"),
            (&self.phone, "phone"),
            (&self.address, "address"),
            (&self.description, "description"),
        ] {
            if value.as_deref().map_or(true, |v| v.trim().is_empty()) {
                errors.push(FieldError::required(param));
            }
        }

        let extra = match category.validate_extras(&self.extra) {
            Ok(extra) => extra,
            Err(extra_errors) => {
                errors.extend(extra_errors);
                serde_json::Value::Object(serde_json::Map::new())
            }
        };

        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        Ok(NewListing {
            text: self.text.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            address: self.address.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            image: self.image,
            price: self.price,
            extra,
        })
    }
}

/// Create a listing
/// POST /api/{category}
pub async fn create_listing(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    user_id: UserId,
    req: web::Json<CreateListingRequest>,
) -> Result<HttpResponse> {
    let category = parse_category(&path.into_inner())?;
    let fields = req.into_inner().validate(category)?;

    let service = ListingService::new((**pool).clone());
    let view = service.create_listing(category, user_id.0, fields).await?;

    Ok(HttpResponse::Created().json(view))
}

/// List all listings of a category, newest first
/// GET /api/{category}
pub async fn list_listings(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let category = parse_category(&path.into_inner())?;

    let service = ListingService::new((**pool).clone());
    let views = service.list_listings(category).await?;

    Ok(HttpResponse::Ok().json(views))
}

/// Get a listing by id
/// GET /api/{category}/{id}
pub async fn get_listing(
    pool: web::Data<PgPool>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse> {
    let (category_raw, id_raw) = path.into_inner();
    let category = parse_category(&category_raw)?;
    let listing_id = parse_listing_id(&id_raw)?;

    let service = ListingService::new((**pool).clone());
    let view = service.get_listing(category, listing_id).await?;

    Ok(HttpResponse::Ok().json(view))
}

/// Delete a listing (owner only)
/// DELETE /api/{category}/{id}
pub async fn delete_listing(
    pool: web::Data<PgPool>,
    path: web::Path<(String, String)>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let (category_raw, id_raw) = path.into_inner();
    let category = parse_category(&category_raw)?;
    let listing_id = parse_listing_id(&id_raw)?;

    let service = ListingService::new((**pool).clone());
    service
        .delete_listing(category, listing_id, user_id.0)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "msg": "Post removed" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(body: serde_json::Value) -> CreateListingRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_validate_collects_all_missing_fields() {
        let err = request(serde_json::json!({ "text": "Driver needed" }))
            .validate(Category::Jobs)
            .unwrap_err();

        let AppError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        let params: Vec<&str> = errors.iter().map(|e| e.param.as_str()).collect();
        assert_eq!(
            params,
            vec![
                "phone",
                "address",
                "description",
                "hinhThucTraLuong",
                "loaiCongViec",
                "nganhNghe"
            ]
        );
    }

    #[test]
    fn test_validate_accepts_complete_job() {
        let fields = request(serde_json::json!({
            "text": "Driver needed",
            "phone": "0900000000",
            "address": "Hanoi",
            "description": "Night shifts, own bike",
            "hinhThucTraLuong": "monthly",
            "loaiCongViec": "full-time",
            "nganhNghe": "logistics",
            "price": "8000000"
        }))
        .validate(Category::Jobs)
        .unwrap();

        assert_eq!(fields.text, "Driver needed");
        assert_eq!(fields.price.as_deref(), Some("8000000"));
        assert_eq!(
            fields.extra,
            serde_json::json!({
                "hinhThucTraLuong": "monthly",
                "loaiCongViec": "full-time",
                "nganhNghe": "logistics"
            })
        );
    }

    #[test]
    fn test_validate_drops_undeclared_tags() {
        let fields = request(serde_json::json!({
            "text": "Corgi puppy",
            "phone": "0911111111",
            "address": "Da Nang",
            "description": "Three months old",
            "loaiPet": "dog",
            "pedigree": "yes"
        }))
        .validate(Category::Pets)
        .unwrap();

        assert_eq!(fields.extra, serde_json::json!({ "loaiPet": "dog" }));
    }

    #[test]
    fn test_whitespace_only_field_is_missing() {
        let err = request(serde_json::json!({
            "text": "   ",
            "phone": "0900000000",
            "address": "Hanoi",
            "description": "ok"
        }))
        .validate(Category::Services)
        .unwrap_err();

        let AppError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors, vec![FieldError::required("text")]);
    }
}
