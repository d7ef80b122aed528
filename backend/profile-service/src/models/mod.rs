/// Data models for profile-service
///
/// This module defines structures for:
/// - Profile: the owner's full profile record
/// - PublicProfile: the projection exposed to unauthenticated viewers
/// - Request DTOs for settings, photo and upload endpoints
/// - UploadCredential: the pre-signed upload grant
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;
use validator::Validate;

// ========================================
// Profile Models
// ========================================

/// Profile database entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub bio: String,
    pub image: String,
    pub location: String,
    pub website_url: String,
    pub email_notifications: bool,
    pub newsletter: bool,
}

/// Post as shown on a public profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicPost {
    pub id: Uuid,
    pub title: String,
    pub excerpt: String,
    pub slug: String,
    pub read_time_mins: i32,
    pub published: Option<DateTime<Utc>>,
}

/// Public profile projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicProfile {
    pub username: String,
    pub name: String,
    pub bio: String,
    pub image: String,
    pub posts: Vec<PublicPost>,
}

impl PublicProfile {
    /// Drop drafts and order posts newest-published first.
    pub fn published_only(mut self) -> Self {
        self.posts.retain(|post| post.published.is_some());
        self.posts.sort_by(|a, b| b.published.cmp(&a.published));
        self
    }
}

// ========================================
// Request DTOs
// ========================================

/// PATCH /api/v1/profile
///
/// Every field is optional; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SaveSettingsRequest {
    #[validate(length(max = 50))]
    pub name: Option<String>,

    #[validate(length(min = 3, max = 40))]
    pub username: Option<String>,

    #[validate(length(max = 200))]
    pub bio: Option<String>,

    #[validate(length(max = 100))]
    pub location: Option<String>,

    #[validate(length(max = 2048))]
    pub website_url: Option<String>,

    pub email_notifications: Option<bool>,

    pub newsletter: Option<bool>,
}

/// PUT /api/v1/profile/photo
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdatePhotoUrlRequest {
    #[validate(length(min = 1, max = 2048))]
    pub url: String,
}

/// POST /api/v1/profile/upload-url
///
/// `size` is any JSON number, so `1000.0` and `9e6` are accepted.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UploadUrlRequest {
    #[validate(range(min = 0.0))]
    pub size: f64,

    #[serde(rename = "type")]
    #[validate(length(min = 1))]
    pub content_type: String,
}

// ========================================
// Upload Models
// ========================================

/// Pre-signed upload grant returned by the signer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadCredential {
    /// Target URL for a direct PUT to object storage
    pub url: String,
    /// Object key the upload lands on
    pub key: String,
    /// Headers the client must send with the upload
    pub fields: BTreeMap<String, String>,
    /// Seconds until `url` stops being accepted
    pub expires_in: u64,
}
