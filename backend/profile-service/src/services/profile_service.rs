/// Profile service - owner-scoped edits and public profile lookup
use std::sync::Arc;
use uuid::Uuid;

use crate::db::ProfileStore;
use crate::error::{AppError, Result};
use crate::models::{Profile, PublicProfile, SaveSettingsRequest};

const PROFILE_NOT_FOUND: &str = "Profile not found";

#[derive(Clone)]
pub struct ProfileService {
    store: Arc<dyn ProfileStore>,
}

impl ProfileService {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    /// Merge the present settings fields into the caller's own profile
    pub async fn edit_profile(
        &self,
        user_id: Uuid,
        fields: &SaveSettingsRequest,
    ) -> Result<Profile> {
        let profile = self
            .store
            .update_settings(user_id, fields)
            .await?
            .ok_or_else(|| AppError::NotFound(PROFILE_NOT_FOUND.to_string()))?;

        tracing::info!(user_id = %user_id, "profile settings updated");
        Ok(profile)
    }

    /// Commit an uploaded photo URL to the caller's own profile
    pub async fn update_photo_url(&self, user_id: Uuid, url: &str) -> Result<Profile> {
        let profile = self
            .store
            .update_image(user_id, url)
            .await?
            .ok_or_else(|| AppError::NotFound(PROFILE_NOT_FOUND.to_string()))?;

        tracing::info!(user_id = %user_id, "profile photo updated");
        Ok(profile)
    }

    /// Public, unauthenticated lookup by username
    pub async fn get_public_profile(&self, username: &str) -> Result<PublicProfile> {
        match self.store.find_public_profile(username).await? {
            Some(profile) => Ok(profile.published_only()),
            None => {
                tracing::debug!(username, "profile lookup miss");
                Err(AppError::NotFound(PROFILE_NOT_FOUND.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::collections::HashMap;
    use std::sync::Mutex;

    use crate::models::PublicPost;

    /// In-memory store; hands back posts unfiltered
    #[derive(Default)]
    struct MapStore {
        profiles: Mutex<HashMap<Uuid, Profile>>,
        posts: Vec<PublicPost>,
    }

    fn profile(id: Uuid, username: &str) -> Profile {
        Profile {
            id,
            username: username.to_string(),
            name: String::new(),
            bio: String::new(),
            image: "/images/person.png".to_string(),
            location: String::new(),
            website_url: String::new(),
            email_notifications: true,
            newsletter: true,
        }
    }

    #[async_trait]
    impl ProfileStore for MapStore {
        async fn update_settings(
            &self,
            user_id: Uuid,
            fields: &SaveSettingsRequest,
        ) -> Result<Option<Profile>> {
            let mut profiles = self.profiles.lock().unwrap();
            Ok(profiles.get_mut(&user_id).map(|p| {
                if let Some(bio) = &fields.bio {
                    p.bio = bio.clone();
                }
                if let Some(name) = &fields.name {
                    p.name = name.clone();
                }
                p.clone()
            }))
        }

        async fn update_image(&self, user_id: Uuid, url: &str) -> Result<Option<Profile>> {
            let mut profiles = self.profiles.lock().unwrap();
            Ok(profiles.get_mut(&user_id).map(|p| {
                p.image = url.to_string();
                p.clone()
            }))
        }

        async fn find_public_profile(&self, username: &str) -> Result<Option<PublicProfile>> {
            let profiles = self.profiles.lock().unwrap();
            Ok(profiles
                .values()
                .find(|p| p.username == username)
                .map(|p| PublicProfile {
                    username: p.username.clone(),
                    name: p.name.clone(),
                    bio: p.bio.clone(),
                    image: p.image.clone(),
                    posts: self.posts.clone(),
                }))
        }
    }

    #[tokio::test]
    async fn test_edit_only_touches_caller() {
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let store = Arc::new(MapStore::default());
        {
            let mut profiles = store.profiles.lock().unwrap();
            profiles.insert(alice, profile(alice, "alice"));
            profiles.insert(bob, profile(bob, "bob"));
        }
        let service = ProfileService::new(store.clone());

        let fields = SaveSettingsRequest {
            bio: Some("x".to_string()),
            ..Default::default()
        };
        let updated = service.edit_profile(alice, &fields).await.unwrap();
        assert_eq!(updated.bio, "x");

        let profiles = store.profiles.lock().unwrap();
        assert_eq!(profiles[&alice].bio, "x");
        assert_eq!(profiles[&bob].bio, "");
    }

    #[tokio::test]
    async fn test_edit_missing_profile_is_not_found() {
        let service = ProfileService::new(Arc::new(MapStore::default()));
        let err = service
            .edit_profile(Uuid::new_v4(), &SaveSettingsRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_photo_url() {
        let alice = Uuid::new_v4();
        let store = Arc::new(MapStore::default());
        store
            .profiles
            .lock()
            .unwrap()
            .insert(alice, profile(alice, "alice"));
        let service = ProfileService::new(store);

        let updated = service
            .update_photo_url(alice, "https://cdn.example.com/u/a.png")
            .await
            .unwrap();
        assert_eq!(updated.image, "https://cdn.example.com/u/a.png");
    }

    #[tokio::test]
    async fn test_public_profile_filters_and_orders_posts() {
        let alice = Uuid::new_v4();
        let day = |d| Utc.with_ymd_and_hms(2024, 5, d, 8, 0, 0).unwrap();
        let post = |title: &str, published| PublicPost {
            id: Uuid::new_v4(),
            title: title.to_string(),
            excerpt: String::new(),
            slug: title.to_lowercase(),
            read_time_mins: 1,
            published,
        };
        let store = MapStore {
            profiles: Mutex::new(HashMap::from([(alice, profile(alice, "alice"))])),
            posts: vec![
                post("First", Some(day(1))),
                post("Draft", None),
                post("Latest", Some(day(9))),
            ],
        };
        let service = ProfileService::new(Arc::new(store));

        let public = service.get_public_profile("alice").await.unwrap();
        let titles: Vec<_> = public.posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Latest", "First"]);
    }

    #[tokio::test]
    async fn test_unknown_username_is_not_found() {
        let service = ProfileService::new(Arc::new(MapStore::default()));
        let err = service.get_public_profile("nonexistent").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.to_string(), "Profile not found");
    }
}
