//! Authentication configuration: token signing and the session cookie

use serde::{Deserialize, Serialize};
use std::env;

use super::ConfigError;

/// Token lifetime used when nothing is configured (15 minutes)
pub const DEFAULT_TOKEN_LIFETIME_SECONDS: i64 = 900;

/// Renewal limit used when nothing is configured (7 days)
pub const DEFAULT_RENEWAL_LIMIT_SECONDS: i64 = 604_800;

/// Issuer written into every token
pub const DEFAULT_ISSUER: &str = "foodloopz";

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,

    /// Signing algorithm name (HS256, HS384 or HS512)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Seconds between issue and nominal expiration
    pub token_lifetime: i64,

    /// Seconds after nominal expiration during which a token is still renewed
    pub renewal_limit: i64,

    /// JWT issuer claim
    pub issuer: String,
}

impl JwtConfig {
    /// Create a configuration with the given secret and default durations
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            algorithm: default_algorithm(),
            token_lifetime: DEFAULT_TOKEN_LIFETIME_SECONDS,
            renewal_limit: DEFAULT_RENEWAL_LIMIT_SECONDS,
            issuer: DEFAULT_ISSUER.to_string(),
        }
    }

    /// Set the token lifetime in seconds
    pub fn with_token_lifetime(mut self, seconds: i64) -> Self {
        self.token_lifetime = seconds;
        self
    }

    /// Set the renewal limit in seconds
    pub fn with_renewal_limit(mut self, seconds: i64) -> Self {
        self.renewal_limit = seconds;
        self
    }

    /// Set the signing algorithm
    pub fn with_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = algorithm.into();
        self
    }

    /// Load from environment variables.
    ///
    /// The secret has no fallback: a deployment without
    /// `JWT_AUTH_SECRET_KEY` refuses to start.
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = env::var("JWT_AUTH_SECRET_KEY")
            .map_err(|_| ConfigError::Missing("JWT_AUTH_SECRET_KEY".to_string()))?;

        let config = Self {
            secret,
            algorithm: env::var("JWT_AUTH_TOKEN_ENCRYPTION_ALGORITHM")
                .unwrap_or_else(|_| default_algorithm()),
            token_lifetime: parse_seconds(
                "JWT_AUTH_TOKEN_EXPIRY_TIME_SECONDS",
                DEFAULT_TOKEN_LIFETIME_SECONDS,
            )?,
            renewal_limit: parse_seconds(
                "JWT_AUTH_TOKEN_RENEWAL_LIMIT_TIME_SECONDS",
                DEFAULT_RENEWAL_LIMIT_SECONDS,
            )?,
            issuer: env::var("JWT_AUTH_ISSUER").unwrap_or_else(|_| DEFAULT_ISSUER.to_string()),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check invariants that cannot be expressed in the types
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.is_empty() {
            return Err(ConfigError::Missing("JWT_AUTH_SECRET_KEY".to_string()));
        }
        if self.token_lifetime <= 0 {
            return Err(ConfigError::Invalid {
                key: "JWT_AUTH_TOKEN_EXPIRY_TIME_SECONDS".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        if self.renewal_limit <= 0 {
            return Err(ConfigError::Invalid {
                key: "JWT_AUTH_TOKEN_RENEWAL_LIMIT_TIME_SECONDS".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Session cookie carrying the token between requests
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionCookieConfig {
    /// Cookie name
    pub cookie_name: String,

    /// Cookie path
    pub path: String,

    /// Secure flag (HTTPS only)
    pub secure: bool,

    /// SameSite attribute (Strict, Lax or None)
    pub same_site: String,

    /// HttpOnly flag
    #[serde(default = "default_http_only")]
    pub http_only: bool,
}

impl Default for SessionCookieConfig {
    fn default() -> Self {
        Self {
            cookie_name: String::from("token"),
            path: String::from("/"),
            secure: false,
            same_site: String::from("Lax"),
            http_only: default_http_only(),
        }
    }
}

impl SessionCookieConfig {
    /// Load from environment variables, falling back to defaults
    pub fn from_env(secure_by_default: bool) -> Self {
        let defaults = Self::default();
        Self {
            cookie_name: env::var("SESSION_COOKIE_NAME").unwrap_or(defaults.cookie_name),
            path: env::var("SESSION_COOKIE_PATH").unwrap_or(defaults.path),
            secure: env::var("SESSION_COOKIE_SECURE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(secure_by_default),
            same_site: env::var("SESSION_COOKIE_SAME_SITE").unwrap_or(defaults.same_site),
            http_only: defaults.http_only,
        }
    }
}

/// Password hashing configuration
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct PasswordConfig {
    /// bcrypt cost factor
    pub hash_cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        // bcrypt::DEFAULT_COST
        Self { hash_cost: 12 }
    }
}

impl PasswordConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var("PASSWORD_HASH_COST") {
            Ok(raw) => {
                let hash_cost = raw.parse::<u32>().map_err(|_| ConfigError::Invalid {
                    key: "PASSWORD_HASH_COST".to_string(),
                    reason: format!("'{}' is not a number", raw),
                })?;
                if !(4..=31).contains(&hash_cost) {
                    return Err(ConfigError::Invalid {
                        key: "PASSWORD_HASH_COST".to_string(),
                        reason: "must be between 4 and 31".to_string(),
                    });
                }
                Ok(Self { hash_cost })
            }
            Err(_) => Ok(Self::default()),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Session cookie configuration
    #[serde(default)]
    pub cookie: SessionCookieConfig,

    /// Password hashing configuration
    #[serde(default)]
    pub password: PasswordConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env(secure_cookies: bool) -> Result<Self, ConfigError> {
        Ok(Self {
            jwt: JwtConfig::from_env()?,
            cookie: SessionCookieConfig::from_env(secure_cookies),
            password: PasswordConfig::from_env()?,
        })
    }
}

fn parse_seconds(key: &str, default: i64) -> Result<i64, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse::<i64>().map_err(|_| ConfigError::Invalid {
            key: key.to_string(),
            reason: format!("'{}' is not a number of seconds", raw),
        }),
        Err(_) => Ok(default),
    }
}

fn default_algorithm() -> String {
    String::from("HS256")
}

fn default_http_only() -> bool {
    true
}
