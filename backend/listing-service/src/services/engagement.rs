//! Engagement ledger - likes and comments on a listing.
//!
//! Any authenticated identity may like or comment on any listing, including
//! their own; only comment deletion checks ownership. Every mutation is a
//! single conditional statement at the store, so concurrent toggles from
//! different identities cannot drop one another.
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{comment_repo, like_repo, listing_repo, user_repo};
use crate::error::{AppError, Result};
use crate::models::{Category, Comment, Listing};
use crate::services::ownership;

pub struct EngagementService {
    pool: PgPool,
}

impl EngagementService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Like a listing. Fails when the identity already likes it. Returns
    /// the updated likes array, newest first.
    pub async fn like(
        &self,
        category: Category,
        listing_id: Uuid,
        user_id: Uuid,
    ) -> Result<Vec<Uuid>> {
        let listing = self.load_listing(category, listing_id).await?;

        let added = like_repo::add_like(&self.pool, listing.id, user_id).await?;
        if !added {
            return Err(AppError::AlreadyLiked);
        }

        self.likes(listing.id).await
    }

    /// Remove a like. Fails when the identity has not liked the listing.
    /// Returns the updated likes array.
    pub async fn unlike(
        &self,
        category: Category,
        listing_id: Uuid,
        user_id: Uuid,
    ) -> Result<Vec<Uuid>> {
        let listing = self.load_listing(category, listing_id).await?;

        let removed = like_repo::remove_like(&self.pool, listing.id, user_id).await?;
        if !removed {
            return Err(AppError::NotLiked);
        }

        self.likes(listing.id).await
    }

    /// Comment on a listing. The author's profile is read once for the
    /// snapshot fields. Returns the updated comments array, newest first.
    pub async fn add_comment(
        &self,
        category: Category,
        listing_id: Uuid,
        user_id: Uuid,
        text: &str,
    ) -> Result<Vec<Comment>> {
        let listing = self.load_listing(category, listing_id).await?;
        let profile = user_repo::find_by_id(&self.pool, user_id).await?;

        comment_repo::create_comment(
            &self.pool,
            listing.id,
            user_id,
            text,
            profile.as_ref().map(|u| u.username.as_str()),
            profile.as_ref().and_then(|u| u.avatar_url.as_deref()),
        )
        .await?;

        comment_repo::comments_for_listing(&self.pool, listing.id)
            .await
            .map_err(AppError::from)
    }

    /// Delete a comment. Comment owner only; even the listing owner cannot
    /// remove someone else's comment. Returns the updated comments array.
    pub async fn remove_comment(
        &self,
        category: Category,
        listing_id: Uuid,
        comment_id: Uuid,
        acting_id: Uuid,
    ) -> Result<Vec<Comment>> {
        let listing = self.load_listing(category, listing_id).await?;

        let comment = comment_repo::find_comment(&self.pool, listing.id, comment_id)
            .await?
            .ok_or(AppError::CommentNotFound)?;

        ownership::authorize_owner(comment.user_id, acting_id)?;

        comment_repo::delete_comment(&self.pool, comment.id).await?;

        comment_repo::comments_for_listing(&self.pool, listing.id)
            .await
            .map_err(AppError::from)
    }

    async fn load_listing(&self, category: Category, listing_id: Uuid) -> Result<Listing> {
        listing_repo::find_by_id(&self.pool, category, listing_id)
            .await?
            .ok_or_else(AppError::post_not_found)
    }

    async fn likes(&self, listing_id: Uuid) -> Result<Vec<Uuid>> {
        Ok(like_repo::likes_for_listing(&self.pool, listing_id)
            .await?
            .into_iter()
            .map(|like| like.user_id)
            .collect())
    }
}
