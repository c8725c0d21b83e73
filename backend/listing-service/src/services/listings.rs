//! Listing engine - creation, retrieval and deletion, shared by every
//! category.
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::db::{comment_repo, like_repo, listing_repo, user_repo};
use crate::error::{AppError, Result};
use crate::models::{Category, Comment, Listing, ListingView, NewListing};
use crate::services::ownership;

pub struct ListingService {
    pool: PgPool,
}

impl ListingService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a listing owned by `owner_id`.
    ///
    /// The owner's profile is read once here to populate the poster
    /// snapshot; later profile changes do not propagate to the listing.
    pub async fn create_listing(
        &self,
        category: Category,
        owner_id: Uuid,
        fields: NewListing,
    ) -> Result<ListingView> {
        let profile = user_repo::find_by_id(&self.pool, owner_id).await?;

        let listing = listing_repo::create_listing(
            &self.pool,
            category,
            owner_id,
            &fields,
            profile.as_ref().map(|u| u.username.as_str()),
            profile.as_ref().and_then(|u| u.avatar_url.as_deref()),
        )
        .await?;

        tracing::info!(listing_id = %listing.id, category = %category, "listing created");

        Ok(ListingView {
            listing,
            likes: Vec::new(),
            comments: Vec::new(),
        })
    }

    /// Get a listing with its likes and comments
    pub async fn get_listing(&self, category: Category, listing_id: Uuid) -> Result<ListingView> {
        let listing = listing_repo::find_by_id(&self.pool, category, listing_id)
            .await?
            .ok_or_else(AppError::post_not_found)?;

        self.assemble_view(listing).await
    }

    /// All listings of a category, newest first, with their likes and
    /// comments. An empty category yields an empty list.
    pub async fn list_listings(&self, category: Category) -> Result<Vec<ListingView>> {
        let listings = listing_repo::find_all(&self.pool, category).await?;
        if listings.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = listings.iter().map(|l| l.id).collect();

        let mut likes_by_listing: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for like in like_repo::likes_for_listings(&self.pool, &ids).await? {
            likes_by_listing
                .entry(like.listing_id)
                .or_default()
                .push(like.user_id);
        }

        let mut comments_by_listing: HashMap<Uuid, Vec<Comment>> = HashMap::new();
        for comment in comment_repo::comments_for_listings(&self.pool, &ids).await? {
            comments_by_listing
                .entry(comment.listing_id)
                .or_default()
                .push(comment);
        }

        Ok(listings
            .into_iter()
            .map(|listing| {
                let likes = likes_by_listing.remove(&listing.id).unwrap_or_default();
                let comments = comments_by_listing.remove(&listing.id).unwrap_or_default();
                ListingView {
                    listing,
                    likes,
                    comments,
                }
            })
            .collect())
    }

    /// Delete a listing. Owner only; the cascade discards its likes and
    /// comments.
    pub async fn delete_listing(
        &self,
        category: Category,
        listing_id: Uuid,
        acting_id: Uuid,
    ) -> Result<()> {
        let listing = listing_repo::find_by_id(&self.pool, category, listing_id)
            .await?
            .ok_or_else(AppError::post_not_found)?;

        ownership::authorize_owner(listing.owner_id, acting_id)?;

        listing_repo::delete_listing(&self.pool, listing.id).await?;
        tracing::info!(listing_id = %listing.id, category = %category, "listing deleted");

        Ok(())
    }

    async fn assemble_view(&self, listing: Listing) -> Result<ListingView> {
        let likes = like_repo::likes_for_listing(&self.pool, listing.id)
            .await?
            .into_iter()
            .map(|like| like.user_id)
            .collect();
        let comments = comment_repo::comments_for_listing(&self.pool, listing.id).await?;

        Ok(ListingView {
            listing,
            likes,
            comments,
        })
    }
}
