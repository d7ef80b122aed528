/// Route table for profile-service
use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::error::AppError;
use crate::handlers;
use crate::metrics;
use crate::middleware::JwtAuthMiddleware;

/// Malformed JSON bodies fail the schema layer, not the handler
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::Validation(err.to_string()).into()
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(json_error_handler)
}

/// Register every profile-service route
///
/// Owner-scoped routes live under `/api/v1/profile` behind `JwtAuthMiddleware`;
/// the public lookup under `/api/v1/profiles/{username}` is unauthenticated.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/metrics", web::get().to(metrics::metrics_handler))
        .service(
            web::scope("/api/v1")
                .route("/health", web::get().to(handlers::health_check))
                .route("/health/live", web::get().to(handlers::liveness_check))
                .route("/health/ready", web::get().to(handlers::readiness_check))
                .route("/profiles/{username}", web::get().to(handlers::get_profile))
                .service(
                    web::scope("/profile")
                        .wrap(JwtAuthMiddleware)
                        .route("", web::patch().to(handlers::edit_profile))
                        .route("/photo", web::put().to(handlers::update_profile_photo_url))
                        .route("/upload-url", web::post().to(handlers::get_upload_url)),
                ),
        );
}
