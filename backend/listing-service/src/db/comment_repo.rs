use crate::models::Comment;
use sqlx::PgPool;
use uuid::Uuid;

/// Create a new comment with the author's profile snapshot
pub async fn create_comment(
    pool: &PgPool,
    listing_id: Uuid,
    user_id: Uuid,
    text: &str,
    author_name: Option<&str>,
    author_avatar: Option<&str>,
) -> Result<Comment, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO listing_comments (listing_id, user_id, text, author_name, author_avatar)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, listing_id, user_id, text, author_name, author_avatar, created_at
        "#,
    )
    .bind(listing_id)
    .bind(user_id)
    .bind(text)
    .bind(author_name)
    .bind(author_avatar)
    .fetch_one(pool)
    .await?;

    Ok(comment)
}

/// Find a comment by ID within its listing
pub async fn find_comment(
    pool: &PgPool,
    listing_id: Uuid,
    comment_id: Uuid,
) -> Result<Option<Comment>, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, listing_id, user_id, text, author_name, author_avatar, created_at
        FROM listing_comments
        WHERE id = $1 AND listing_id = $2
        "#,
    )
    .bind(comment_id)
    .bind(listing_id)
    .fetch_optional(pool)
    .await?;

    Ok(comment)
}

/// Delete a comment
pub async fn delete_comment(pool: &PgPool, comment_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM listing_comments WHERE id = $1")
        .bind(comment_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// All comments for a listing, newest first
pub async fn comments_for_listing(
    pool: &PgPool,
    listing_id: Uuid,
) -> Result<Vec<Comment>, sqlx::Error> {
    let comments = sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, listing_id, user_id, text, author_name, author_avatar, created_at
        FROM listing_comments
        WHERE listing_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(listing_id)
    .fetch_all(pool)
    .await?;

    Ok(comments)
}

/// Comments for multiple listings in one query, newest first
pub async fn comments_for_listings(
    pool: &PgPool,
    listing_ids: &[Uuid],
) -> Result<Vec<Comment>, sqlx::Error> {
    let comments = sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, listing_id, user_id, text, author_name, author_avatar, created_at
        FROM listing_comments
        WHERE listing_id = ANY($1)
        ORDER BY created_at DESC
        "#,
    )
    .bind(listing_ids)
    .fetch_all(pool)
    .await?;

    Ok(comments)
}
