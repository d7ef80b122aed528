/// Database access layer
///
/// This module provides:
/// - Database connection pooling and migrations
/// - The `ProfileStore` seam used by the profile services
/// - The Postgres implementation backed by `profile_repo`
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Profile, PublicProfile, SaveSettingsRequest};

pub mod profile_repo;

pub async fn create_pool(
    database_url: &str,
    max_connections: u32,
) -> std::result::Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .connect(database_url)
        .await
}

pub async fn run_migrations(
    pool: &PgPool,
) -> std::result::Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Data-store collaborator for profile reads and owner-scoped writes.
///
/// Every write takes the caller's `user_id` explicitly; implementations must
/// only touch that row. Each call is a single round trip.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Merge the present fields of `fields` into the caller's profile.
    async fn update_settings(
        &self,
        user_id: Uuid,
        fields: &SaveSettingsRequest,
    ) -> Result<Option<Profile>>;

    /// Replace the caller's profile image URL.
    async fn update_image(&self, user_id: Uuid, url: &str) -> Result<Option<Profile>>;

    /// Public projection with published posts, newest first.
    async fn find_public_profile(&self, username: &str) -> Result<Option<PublicProfile>>;
}

#[derive(Clone)]
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn update_settings(
        &self,
        user_id: Uuid,
        fields: &SaveSettingsRequest,
    ) -> Result<Option<Profile>> {
        Ok(profile_repo::update_settings(&self.pool, user_id, fields).await?)
    }

    async fn update_image(&self, user_id: Uuid, url: &str) -> Result<Option<Profile>> {
        Ok(profile_repo::update_image(&self.pool, user_id, url).await?)
    }

    async fn find_public_profile(&self, username: &str) -> Result<Option<PublicProfile>> {
        Ok(profile_repo::find_public_profile(&self.pool, username).await?)
    }
}
