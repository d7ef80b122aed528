//! Test fixtures for HTTP-level tests
//! Provides an in-memory profile store, a recording upload signer and app setup
#![allow(dead_code)]

use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use profile_service::db::ProfileStore;
use profile_service::models::{
    Profile, PublicPost, PublicProfile, SaveSettingsRequest, UploadCredential,
};
use profile_service::routes;
use profile_service::security::jwt;
use profile_service::services::{ProfileService, UploadAuthorizationService, UploadSigner};
use profile_service::Result;

pub const TEST_JWT_SECRET: &str = "profile-service-integration-secret";

// ============================================
// In-memory ProfileStore
// ============================================

#[derive(Default)]
pub struct InMemoryProfileStore {
    profiles: Mutex<HashMap<Uuid, Profile>>,
    posts: Mutex<HashMap<Uuid, Vec<PublicPost>>>,
}

impl InMemoryProfileStore {
    pub fn insert_user(&self, username: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.profiles.lock().unwrap().insert(
            id,
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
            },
        );
        id
    }

    /// Posts are stored as given; drafts included
    pub fn insert_post(&self, user_id: Uuid, title: &str, published: Option<DateTime<Utc>>) {
        self.posts
            .lock()
            .unwrap()
            .entry(user_id)
            .or_default()
            .push(PublicPost {
                id: Uuid::new_v4(),
                title: title.to_string(),
                excerpt: format!("{} excerpt", title),
                slug: title.to_lowercase().replace(' ', "-"),
                read_time_mins: 4,
                published,
            });
    }

    pub fn get(&self, user_id: Uuid) -> Option<Profile> {
        self.profiles.lock().unwrap().get(&user_id).cloned()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn update_settings(
        &self,
        user_id: Uuid,
        fields: &SaveSettingsRequest,
    ) -> Result<Option<Profile>> {
        let mut profiles = self.profiles.lock().unwrap();
        Ok(profiles.get_mut(&user_id).map(|p| {
            if let Some(v) = &fields.name {
                p.name = v.clone();
            }
            if let Some(v) = &fields.username {
                p.username = v.clone();
            }
            if let Some(v) = &fields.bio {
                p.bio = v.clone();
            }
            if let Some(v) = &fields.location {
                p.location = v.clone();
            }
            if let Some(v) = &fields.website_url {
                p.website_url = v.clone();
            }
            if let Some(v) = fields.email_notifications {
                p.email_notifications = v;
            }
            if let Some(v) = fields.newsletter {
                p.newsletter = v;
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
        let posts = self.posts.lock().unwrap();
        Ok(profiles
            .values()
            .find(|p| p.username == username)
            .map(|p| PublicProfile {
                username: p.username.clone(),
                name: p.name.clone(),
                bio: p.bio.clone(),
                image: p.image.clone(),
                posts: posts.get(&p.id).cloned().unwrap_or_default(),
            }))
    }
}

// ============================================
// Recording UploadSigner
// ============================================

#[derive(Default)]
pub struct RecordingSigner {
    calls: Mutex<Vec<(Uuid, String, u64)>>,
}

impl RecordingSigner {
    pub fn calls(&self) -> Vec<(Uuid, String, u64)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl UploadSigner for RecordingSigner {
    async fn presign(
        &self,
        user_id: Uuid,
        content_type: &str,
        byte_size: u64,
    ) -> Result<UploadCredential> {
        self.calls
            .lock()
            .unwrap()
            .push((user_id, content_type.to_string(), byte_size));

        let mut fields = BTreeMap::new();
        fields.insert("content-type".to_string(), content_type.to_string());
        Ok(UploadCredential {
            url: format!("https://uploads.test/u/{}?sig=abc", user_id),
            key: format!("u/{}", user_id),
            fields,
            expires_in: 300,
        })
    }
}

// ============================================
// App Setup
// ============================================

pub fn token_for(user_id: Uuid) -> String {
    jwt::initialize_keys(TEST_JWT_SECRET).expect("init jwt keys");
    let token = jwt::generate_access_token(user_id).expect("generate token");
    format!("Bearer {}", token)
}

pub async fn setup_test_app(
    store: Arc<InMemoryProfileStore>,
    signer: Arc<RecordingSigner>,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    jwt::initialize_keys(TEST_JWT_SECRET).expect("init jwt keys");

    let profiles = ProfileService::new(store);
    let uploads = UploadAuthorizationService::new(signer);

    test::init_service(
        App::new()
            .app_data(web::Data::new(profiles))
            .app_data(web::Data::new(uploads))
            .configure(routes::configure),
    )
    .await
}
