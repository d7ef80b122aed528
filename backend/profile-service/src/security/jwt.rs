/// JWT access token validation (HS256)
///
/// Tokens are issued by the identity service; this service only checks
/// signature and expiry and reads the subject as the caller's user id.
use anyhow::{anyhow, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use uuid::Uuid;

const ACCESS_TOKEN_EXPIRY_HOURS: i64 = 1;

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Token type: only "access" tokens are accepted
    pub token_type: String,
}

// Thread-safe mutable storage for JWT keys loaded from environment
lazy_static! {
    static ref JWT_KEYS: RwLock<Option<(EncodingKey, DecodingKey)>> = RwLock::new(None);
}

/// Initialize JWT keys from the shared HMAC secret
/// Must be called during application startup before any JWT operations
pub fn initialize_keys(secret: &str) -> Result<()> {
    if secret.is_empty() {
        return Err(anyhow!("JWT secret must not be empty"));
    }

    let mut keys = JWT_KEYS
        .write()
        .map_err(|e| anyhow!("Failed to acquire write lock on JWT keys: {}", e))?;
    *keys = Some((
        EncodingKey::from_secret(secret.as_bytes()),
        DecodingKey::from_secret(secret.as_bytes()),
    ));

    Ok(())
}

fn get_encoding_key() -> Result<EncodingKey> {
    let keys = JWT_KEYS
        .read()
        .map_err(|e| anyhow!("Failed to acquire read lock on JWT keys: {}", e))?;

    keys.as_ref()
        .map(|(enc, _)| enc.clone())
        .ok_or_else(|| anyhow!("JWT keys not initialized. Call initialize_keys() during startup"))
}

fn get_decoding_key() -> Result<DecodingKey> {
    let keys = JWT_KEYS
        .read()
        .map_err(|e| anyhow!("Failed to acquire read lock on JWT keys: {}", e))?;

    keys.as_ref()
        .map(|(_, dec)| dec.clone())
        .ok_or_else(|| anyhow!("JWT keys not initialized. Call initialize_keys() during startup"))
}

/// Generate an access token for `user_id`.
///
/// Only tests mint tokens here; production tokens come from the identity service.
pub fn generate_access_token(user_id: Uuid) -> Result<String> {
    let now = Utc::now();
    let expiry = now + Duration::hours(ACCESS_TOKEN_EXPIRY_HOURS);

    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: expiry.timestamp(),
        token_type: "access".to_string(),
    };

    encode(&Header::new(Algorithm::HS256), &claims, &get_encoding_key()?)
        .map_err(|e| anyhow!("Failed to generate access token: {}", e))
}

/// Validate and decode an access token
pub fn validate_token(token: &str) -> Result<TokenData<Claims>> {
    let data = decode::<Claims>(token, &get_decoding_key()?, &Validation::new(Algorithm::HS256))
        .map_err(|e| anyhow!("Token validation failed: {}", e))?;

    if data.claims.token_type != "access" {
        return Err(anyhow!("Token validation failed: not an access token"));
    }

    Ok(data)
}
