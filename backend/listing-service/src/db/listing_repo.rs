use crate::models::{Category, Listing, NewListing};
use sqlx::PgPool;
use uuid::Uuid;

/// Create a new listing with the owner's profile snapshot
pub async fn create_listing(
    pool: &PgPool,
    category: Category,
    owner_id: Uuid,
    fields: &NewListing,
    poster_name: Option<&str>,
    poster_avatar: Option<&str>,
) -> Result<Listing, sqlx::Error> {
    let listing = sqlx::query_as::<_, Listing>(
        r#"
        INSERT INTO listings
            (category, owner_id, text, description, address, phone, image, price, extra,
             poster_name, poster_avatar)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING id, category, owner_id, text, description, address, phone, image, price,
                  extra, poster_name, poster_avatar, created_at
        "#,
    )
    .bind(category.as_str())
    .bind(owner_id)
    .bind(&fields.text)
    .bind(&fields.description)
    .bind(&fields.address)
    .bind(&fields.phone)
    .bind(&fields.image)
    .bind(&fields.price)
    .bind(&fields.extra)
    .bind(poster_name)
    .bind(poster_avatar)
    .fetch_one(pool)
    .await?;

    Ok(listing)
}

/// Find a listing by ID within its category
pub async fn find_by_id(
    pool: &PgPool,
    category: Category,
    listing_id: Uuid,
) -> Result<Option<Listing>, sqlx::Error> {
    let listing = sqlx::query_as::<_, Listing>(
        r#"
        SELECT id, category, owner_id, text, description, address, phone, image, price,
               extra, poster_name, poster_avatar, created_at
        FROM listings
        WHERE id = $1 AND category = $2
        "#,
    )
    .bind(listing_id)
    .bind(category.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(listing)
}

/// All listings of a category, newest first
pub async fn find_all(pool: &PgPool, category: Category) -> Result<Vec<Listing>, sqlx::Error> {
    let listings = sqlx::query_as::<_, Listing>(
        r#"
        SELECT id, category, owner_id, text, description, address, phone, image, price,
               extra, poster_name, poster_avatar, created_at
        FROM listings
        WHERE category = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(category.as_str())
    .fetch_all(pool)
    .await?;

    Ok(listings)
}

/// Delete a listing. Embedded likes and comments go with it through the
/// foreign-key cascade.
pub async fn delete_listing(pool: &PgPool, listing_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM listings WHERE id = $1")
        .bind(listing_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
