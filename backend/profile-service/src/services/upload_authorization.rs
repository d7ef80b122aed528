/// Upload authorization - policy gate in front of the pre-signed URL signer
///
/// Checks the caller-declared content type and size, then delegates to an
/// `UploadSigner`. The declared type is trusted; file bytes are never inspected.
use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::metrics;
use crate::models::UploadCredential;

/// Largest accepted photo upload (8 MiB, inclusive)
pub const MAX_UPLOAD_BYTES: u64 = 8_388_608;

static ALLOWED_IMAGE_SUBTYPES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["jpg", "jpeg", "gif", "png", "webp"].into_iter().collect());

/// External collaborator producing identity-scoped upload credentials.
///
/// Expiry and object key layout are owned by the implementation.
#[async_trait]
pub trait UploadSigner: Send + Sync {
    async fn presign(
        &self,
        user_id: Uuid,
        content_type: &str,
        byte_size: u64,
    ) -> Result<UploadCredential>;
}

/// Subtype of a MIME type: the segment after the first `/`
pub fn content_subtype(content_type: &str) -> Option<&str> {
    content_type.split('/').nth(1)
}

/// Check a declared upload against policy. The format check runs first.
///
/// `byte_size` is compared as declared, so 8388608.5 is over the limit.
pub fn check_upload_policy(content_type: &str, byte_size: f64) -> Result<()> {
    let allowed = content_subtype(content_type)
        .map(|subtype| ALLOWED_IMAGE_SUBTYPES.contains(subtype))
        .unwrap_or(false);
    if !allowed {
        return Err(AppError::InvalidFormat);
    }

    if byte_size > MAX_UPLOAD_BYTES as f64 {
        return Err(AppError::PayloadTooLarge);
    }

    Ok(())
}

#[derive(Clone)]
pub struct UploadAuthorizationService {
    signer: Arc<dyn UploadSigner>,
}

impl UploadAuthorizationService {
    pub fn new(signer: Arc<dyn UploadSigner>) -> Self {
        Self { signer }
    }

    /// Validate the request and, if it passes, return the signer's credential unchanged.
    ///
    /// Fractional sizes are rounded up to whole bytes for the signer.
    pub async fn request_upload_credential(
        &self,
        user_id: Uuid,
        content_type: &str,
        byte_size: f64,
    ) -> Result<UploadCredential> {
        if let Err(err) = check_upload_policy(content_type, byte_size) {
            let outcome = match err {
                AppError::PayloadTooLarge => "payload_too_large",
                _ => "invalid_format",
            };
            metrics::record_upload_outcome(outcome);
            tracing::debug!(
                user_id = %user_id,
                content_type,
                byte_size,
                outcome,
                "upload request rejected"
            );
            return Err(err);
        }

        // In range: non-negative and at most MAX_UPLOAD_BYTES after the check
        let byte_size = byte_size.ceil() as u64;

        match self.signer.presign(user_id, content_type, byte_size).await {
            Ok(credential) => {
                metrics::record_upload_outcome("issued");
                tracing::info!(
                    user_id = %user_id,
                    key = %credential.key,
                    byte_size,
                    "upload credential issued"
                );
                Ok(credential)
            }
            Err(err) => {
                metrics::record_upload_outcome("signer_error");
                Err(err)
            }
        }
    }
}
