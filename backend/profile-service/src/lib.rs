//! Profile Service
//!
//! Profile settings edits, profile photo upload authorization, and public
//! profile pages with published posts.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod security;
pub mod services;
pub mod validators;

// Public re-exports
pub use config::Config;
pub use error::{AppError, Result};
