use crate::models::User;
use sqlx::PgPool;
use uuid::Uuid;

/// Look up a user's profile in the identity directory.
///
/// Consumed at listing and comment creation to take the denormalized
/// name/avatar snapshot. A missing entry is not an error; the snapshot
/// fields stay empty.
pub async fn find_by_id(pool: &PgPool, user_id: Uuid) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, avatar_url
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}
