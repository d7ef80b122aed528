/// Profile handlers - HTTP endpoints for profile operations
use actix_web::{web, HttpResponse};

use crate::error::Result;
use crate::metrics;
use crate::middleware::UserId;
use crate::models::{SaveSettingsRequest, UpdatePhotoUrlRequest, UploadUrlRequest};
use crate::services::{ProfileService, UploadAuthorizationService};
use crate::validators;

/// PATCH /api/v1/profile
pub async fn edit_profile(
    service: web::Data<ProfileService>,
    user_id: UserId,
    req: web::Json<SaveSettingsRequest>,
) -> Result<HttpResponse> {
    validators::validate_settings(&req)?;
    metrics::record_request("edit");

    let profile = service.edit_profile(user_id.0, &req).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// PUT /api/v1/profile/photo
pub async fn update_profile_photo_url(
    service: web::Data<ProfileService>,
    user_id: UserId,
    req: web::Json<UpdatePhotoUrlRequest>,
) -> Result<HttpResponse> {
    validators::validate_photo_url(&req)?;
    metrics::record_request("update_photo");

    let profile = service.update_photo_url(user_id.0, &req.url).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// POST /api/v1/profile/upload-url
pub async fn get_upload_url(
    uploads: web::Data<UploadAuthorizationService>,
    user_id: UserId,
    req: web::Json<UploadUrlRequest>,
) -> Result<HttpResponse> {
    validators::validate_upload_request(&req)?;
    metrics::record_request("get_upload_url");

    let credential = uploads
        .request_upload_credential(user_id.0, &req.content_type, req.size)
        .await?;
    Ok(HttpResponse::Ok().json(credential))
}

/// GET /api/v1/profiles/{username}
pub async fn get_profile(
    service: web::Data<ProfileService>,
    username: web::Path<String>,
) -> Result<HttpResponse> {
    validators::validate_lookup_username(&username)?;
    metrics::record_request("get");

    let profile = service.get_public_profile(&username).await?;
    Ok(HttpResponse::Ok().json(profile))
}
