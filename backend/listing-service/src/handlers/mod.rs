//! HTTP request handlers.
pub mod engagement;
pub mod health;
pub mod listings;

pub use engagement::{create_comment, delete_comment, like_listing, unlike_listing};
pub use health::{health_check, liveness_check, readiness_check};
pub use listings::{create_listing, delete_listing, get_listing, list_listings};

use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::Category;

/// Resolve the category path segment. The set is closed; anything else is a
/// 404.
pub(crate) fn parse_category(raw: &str) -> Result<Category> {
    raw.parse()
        .map_err(|_| AppError::NotFound("Unknown category".to_string()))
}

/// Parse a listing id path segment. A malformed id maps to the same 404 as
/// a missing listing, so callers cannot probe the id format.
pub(crate) fn parse_listing_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::post_not_found())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category("jobs").unwrap(), Category::Jobs);
        assert!(matches!(
            parse_category("v1").unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[test]
    fn test_malformed_id_maps_to_not_found() {
        let err = parse_listing_id("not-an-object-id").unwrap_err();
        match err {
            AppError::NotFound(msg) => assert_eq!(msg, "Post not found"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
