/// Profile repository - database operations for profiles and their posts
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Profile, PublicPost, PublicProfile, SaveSettingsRequest};

#[derive(sqlx::FromRow)]
struct PublicProfileRow {
    username: String,
    name: String,
    bio: String,
    image: String,
    posts: Json<Vec<PublicPost>>,
}

/// Apply a partial settings update to the caller's own row.
/// NULL parameters keep the current column value.
pub async fn update_settings(
    pool: &PgPool,
    user_id: Uuid,
    fields: &SaveSettingsRequest,
) -> Result<Option<Profile>, sqlx::Error> {
    sqlx::query_as::<_, Profile>(
        r#"
        UPDATE users
        SET name = COALESCE($2, name),
            username = COALESCE($3, username),
            bio = COALESCE($4, bio),
            location = COALESCE($5, location),
            website_url = COALESCE($6, website_url),
            email_notifications = COALESCE($7, email_notifications),
            newsletter = COALESCE($8, newsletter),
            updated_at = NOW()
        WHERE id = $1
        RETURNING id, username, name, bio, image, location, website_url,
                  email_notifications, newsletter
        "#,
    )
    .bind(user_id)
    .bind(fields.name.as_deref())
    .bind(fields.username.as_deref())
    .bind(fields.bio.as_deref())
    .bind(fields.location.as_deref())
    .bind(fields.website_url.as_deref())
    .bind(fields.email_notifications)
    .bind(fields.newsletter)
    .fetch_optional(pool)
    .await
}

/// Set the caller's profile image URL
pub async fn update_image(
    pool: &PgPool,
    user_id: Uuid,
    url: &str,
) -> Result<Option<Profile>, sqlx::Error> {
    sqlx::query_as::<_, Profile>(
        r#"
        UPDATE users
        SET image = $2, updated_at = NOW()
        WHERE id = $1
        RETURNING id, username, name, bio, image, location, website_url,
                  email_notifications, newsletter
        "#,
    )
    .bind(user_id)
    .bind(url)
    .fetch_optional(pool)
    .await
}

/// Find a public profile by username, with published posts aggregated in the same query
pub async fn find_public_profile(
    pool: &PgPool,
    username: &str,
) -> Result<Option<PublicProfile>, sqlx::Error> {
    let row = sqlx::query_as::<_, PublicProfileRow>(
        r#"
        SELECT u.username, u.name, u.bio, u.image,
               COALESCE(
                   (SELECT json_agg(
                               json_build_object(
                                   'id', p.id,
                                   'title', p.title,
                                   'excerpt', p.excerpt,
                                   'slug', p.slug,
                                   'read_time_mins', p.read_time_mins,
                                   'published', p.published
                               )
                               ORDER BY p.published DESC
                           )
                    FROM posts p
                    WHERE p.user_id = u.id AND p.published IS NOT NULL),
                   '[]'::json
               ) AS posts
        FROM users u
        WHERE u.username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| PublicProfile {
        username: r.username,
        name: r.name,
        bio: r.bio,
        image: r.image,
        posts: r.posts.0,
    }))
}
