//! Data models for the listing service.
pub mod category;

pub use category::Category;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A classified-ad document in one category.
///
/// `poster_name`/`poster_avatar` are a snapshot of the owner's profile taken
/// at creation time and never synced afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Listing {
    pub id: Uuid,
    #[sqlx(try_from = "String")]
    pub category: Category,
    pub owner_id: Uuid,
    pub text: String,
    pub description: String,
    pub address: String,
    pub phone: String,
    pub image: Option<String>,
    pub price: Option<String>,
    /// Category-specific string tags, flattened into the JSON document so
    /// clients see them as top-level fields.
    #[serde(flatten)]
    pub extra: serde_json::Value,
    pub poster_name: Option<String>,
    pub poster_avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Like {
    pub listing_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub listing_id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    pub author_name: Option<String>,
    pub author_avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Identity directory entry. This service only reads it, at listing and
/// comment creation time, to populate the denormalized snapshot fields.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub avatar_url: Option<String>,
}

/// Validated input for a new listing, produced by the create-request
/// validation and consumed by the engine.
#[derive(Debug, Clone)]
pub struct NewListing {
    pub text: String,
    pub description: String,
    pub address: String,
    pub phone: String,
    pub image: Option<String>,
    pub price: Option<String>,
    pub extra: serde_json::Value,
}

/// A listing as served over the API: the document plus its likes (user ids,
/// newest first) and comments (newest first).
#[derive(Debug, Serialize)]
pub struct ListingView {
    #[serde(flatten)]
    pub listing: Listing,
    pub likes: Vec<Uuid>,
    pub comments: Vec<Comment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_view_serializes_extra_fields_flat() {
        let listing = Listing {
            id: Uuid::new_v4(),
            category: Category::Jobs,
            owner_id: Uuid::new_v4(),
            text: "Driver needed".to_string(),
            description: "Night shifts".to_string(),
            address: "Hanoi".to_string(),
            phone: "0900000000".to_string(),
            image: None,
            price: None,
            extra: serde_json::json!({ "nganhNghe": "logistics" }),
            poster_name: Some("an".to_string()),
            poster_avatar: None,
            created_at: Utc::now(),
        };
        let view = ListingView {
            listing,
            likes: vec![],
            comments: vec![],
        };

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["category"], "jobs");
        assert_eq!(json["nganhNghe"], "logistics");
        assert!(json.get("extra").is_none());
        assert_eq!(json["likes"], serde_json::json!([]));
        assert_eq!(json["comments"], serde_json::json!([]));
    }
}
