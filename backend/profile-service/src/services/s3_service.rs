use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;
use uuid::Uuid;

use crate::config::S3Config;
use crate::error::{AppError, Result};
use crate::models::UploadCredential;
use crate::services::upload_authorization::{content_subtype, UploadSigner};

/// Build an AWS S3 client from the provided configuration.
///
/// Static credentials are used when both keys are configured; otherwise the
/// default provider chain applies.
pub async fn build_s3_client(config: &S3Config) -> Client {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(config.region.clone()));

    if let (Some(key_id), Some(secret)) = (&config.access_key_id, &config.secret_access_key) {
        loader = loader.credentials_provider(Credentials::new(
            key_id,
            secret,
            None,
            None,
            "profile-service",
        ));
    }

    let shared_config = loader.load().await;

    let mut builder = aws_sdk_s3::config::Builder::from(&shared_config);
    if let Some(endpoint) = &config.endpoint {
        // S3-compatible stores (MinIO, R2) expect path-style addressing
        builder = builder.endpoint_url(endpoint).force_path_style(true);
    }

    Client::from_conf(builder.build())
}

/// Object key for a user's profile photo. One object per user; re-uploads overwrite.
pub fn profile_photo_key(user_id: Uuid, content_type: &str) -> String {
    match content_subtype(content_type) {
        Some(ext) if !ext.is_empty() => format!("u/{}.{}", user_id, ext),
        _ => format!("u/{}", user_id),
    }
}

/// Pre-signed PUT signer for profile photos
#[derive(Clone)]
pub struct S3UploadSigner {
    client: Client,
    bucket: String,
    expires_in: Duration,
}

impl S3UploadSigner {
    pub fn new(client: Client, config: &S3Config) -> Self {
        Self {
            client,
            bucket: config.bucket.clone(),
            expires_in: Duration::from_secs(config.presign_expiry_secs),
        }
    }

    pub async fn from_config(config: &S3Config) -> Self {
        Self::new(build_s3_client(config).await, config)
    }
}

#[async_trait]
impl UploadSigner for S3UploadSigner {
    async fn presign(
        &self,
        user_id: Uuid,
        content_type: &str,
        byte_size: u64,
    ) -> Result<UploadCredential> {
        let key = profile_photo_key(user_id, content_type);
        let content_length = i64::try_from(byte_size)
            .map_err(|_| AppError::Internal(format!("upload size {byte_size} out of range")))?;

        let presign_cfg = PresigningConfig::builder()
            .expires_in(self.expires_in)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create presign config: {e}")))?;

        // Content type and length are signed; the upload must match them.
        let presigned = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(content_type)
            .content_length(content_length)
            .presigned(presign_cfg)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to generate presigned URL: {e}")))?;

        let fields: BTreeMap<String, String> = presigned
            .headers()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        Ok(UploadCredential {
            url: presigned.uri().to_string(),
            key,
            fields,
            expires_in: self.expires_in.as_secs(),
        })
    }
}
