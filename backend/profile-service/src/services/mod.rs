/// Business logic layer for profile-service
///
/// - upload_authorization: policy gate in front of the pre-signed URL signer
/// - s3_service: S3-backed signer producing pre-signed PUT URLs
/// - profile_service: owner-scoped edits and public profile lookup
pub mod profile_service;
pub mod s3_service;
pub mod upload_authorization;

pub use profile_service::ProfileService;
pub use s3_service::S3UploadSigner;
pub use upload_authorization::{UploadAuthorizationService, UploadSigner};
