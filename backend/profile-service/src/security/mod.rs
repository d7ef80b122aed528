/// Bearer token handling for owner-scoped endpoints
pub mod jwt;

pub use jwt::{initialize_keys, validate_token, Claims};
