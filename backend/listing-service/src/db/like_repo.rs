use crate::models::Like;
use sqlx::PgPool;
use uuid::Uuid;

/// Add a like if the user has not liked the listing yet.
///
/// The insert is conditional at the store, so two concurrent likes can never
/// both succeed. Returns false when the like already existed.
pub async fn add_like(pool: &PgPool, listing_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO listing_likes (listing_id, user_id)
        VALUES ($1, $2)
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(listing_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Remove a like if present. Returns false when there was nothing to remove.
pub async fn remove_like(
    pool: &PgPool,
    listing_id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM listing_likes
        WHERE listing_id = $1 AND user_id = $2
        "#,
    )
    .bind(listing_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// All likes for a listing, newest first
pub async fn likes_for_listing(pool: &PgPool, listing_id: Uuid) -> Result<Vec<Like>, sqlx::Error> {
    let likes = sqlx::query_as::<_, Like>(
        r#"
        SELECT listing_id, user_id, created_at
        FROM listing_likes
        WHERE listing_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(listing_id)
    .fetch_all(pool)
    .await?;

    Ok(likes)
}

/// Likes for multiple listings in one query, newest first
pub async fn likes_for_listings(
    pool: &PgPool,
    listing_ids: &[Uuid],
) -> Result<Vec<Like>, sqlx::Error> {
    let likes = sqlx::query_as::<_, Like>(
        r#"
        SELECT listing_id, user_id, created_at
        FROM listing_likes
        WHERE listing_id = ANY($1)
        ORDER BY created_at DESC
        "#,
    )
    .bind(listing_ids)
    .fetch_all(pool)
    .await?;

    Ok(likes)
}
