/// HTTP handlers for profile-service
///
/// - profile: settings edit, photo URL, upload URL, public lookup
/// - health: liveness and readiness probes
pub mod health;
pub mod profile;

pub use health::{health_check, liveness_check, readiness_check};
pub use profile::{edit_profile, get_profile, get_upload_url, update_profile_photo_url};
