//! Shared utilities and common types for the Foodloopz server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structures
//! - Validation utilities (email, organization numbers)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, ConfigError, CorsConfig, Environment, JwtConfig, LogFormat,
    LoggingConfig, PasswordConfig, ServerConfig, SessionCookieConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use utils::validation;
