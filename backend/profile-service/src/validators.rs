use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::{SaveSettingsRequest, UpdatePhotoUrlRequest, UploadUrlRequest};

// Input validation for profile-service requests

static USERNAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9_-]{3,40}$")
        .expect("hardcoded username regex is invalid - fix source code")
});

/// Validate username format (3-40 characters, alphanumeric with - and _)
pub fn validate_username(username: &str) -> bool {
    USERNAME_REGEX.is_match(username)
}

/// Absolute http(s) URL
pub fn validate_http_url(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host().is_some(),
        Err(_) => false,
    }
}

/// Website field on the settings form may be cleared with an empty string
pub fn validate_website_url(value: &str) -> bool {
    value.is_empty() || validate_http_url(value)
}

pub fn validate_settings(req: &SaveSettingsRequest) -> Result<()> {
    req.validate()?;

    if let Some(ref username) = req.username {
        if !validate_username(username) {
            return Err(AppError::Validation(
                "username may only contain letters, numbers, '-' and '_'".to_string(),
            ));
        }
    }

    if let Some(ref website_url) = req.website_url {
        if !validate_website_url(website_url) {
            return Err(AppError::Validation(
                "website_url must be an http(s) URL".to_string(),
            ));
        }
    }

    Ok(())
}

pub fn validate_photo_url(req: &UpdatePhotoUrlRequest) -> Result<()> {
    req.validate()?;

    if !validate_http_url(&req.url) {
        return Err(AppError::Validation("url must be an http(s) URL".to_string()));
    }

    Ok(())
}

pub fn validate_upload_request(req: &UploadUrlRequest) -> Result<()> {
    req.validate()?;

    if !req.size.is_finite() {
        return Err(AppError::Validation("size must be a finite number".to_string()));
    }

    Ok(())
}

pub fn validate_lookup_username(username: &str) -> Result<()> {
    if username.trim().is_empty() {
        return Err(AppError::Validation("username is required".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_username() {
        assert!(validate_username("john_doe"));
        assert!(validate_username("user-123"));
        assert!(validate_username("abc"));
    }

    #[test]
    fn test_invalid_username() {
        assert!(!validate_username("ab")); // Too short
        assert!(!validate_username(&"a".repeat(41))); // Too long
        assert!(!validate_username("user@name")); // Invalid character
    }

    #[test]
    fn test_website_url() {
        assert!(validate_website_url(""));
        assert!(validate_website_url("https://example.com/me"));
        assert!(!validate_website_url("example.com"));
        assert!(!validate_website_url("javascript:alert(1)"));
    }

    #[test]
    fn test_settings_rejects_bad_username_shape() {
        let req = SaveSettingsRequest {
            username: Some("bad name".to_string()),
            ..Default::default()
        };
        assert!(matches!(validate_settings(&req), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_photo_url_requires_http() {
        let ok = UpdatePhotoUrlRequest {
            url: "https://cdn.example.com/u/1.png".to_string(),
        };
        assert!(validate_photo_url(&ok).is_ok());

        let bad = UpdatePhotoUrlRequest {
            url: "ftp://example.com/a.png".to_string(),
        };
        assert!(validate_photo_url(&bad).is_err());
    }

    #[test]
    fn test_negative_upload_size_is_schema_error() {
        let req = UploadUrlRequest {
            size: -1.0,
            content_type: "image/png".to_string(),
        };
        assert!(matches!(
            validate_upload_request(&req),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_non_finite_upload_size_is_schema_error() {
        for size in [f64::NAN, f64::INFINITY] {
            let req = UploadUrlRequest {
                size,
                content_type: "image/png".to_string(),
            };
            assert!(matches!(
                validate_upload_request(&req),
                Err(AppError::Validation(_))
            ));
        }
    }
}
