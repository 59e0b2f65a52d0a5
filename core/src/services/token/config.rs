//! Configuration for the token service

use std::str::FromStr;

use chrono::Duration;
use fl_shared::config::JwtConfig;
use jsonwebtoken::Algorithm;

use crate::errors::{DomainError, TokenError};

/// Configuration for the token service, fixed at startup
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT signing algorithm (HMAC family only)
    pub algorithm: Algorithm,
    /// Time between issue and nominal expiration
    pub token_lifetime: Duration,
    /// Time after nominal expiration during which the token is renewed
    pub renewal_limit: Duration,
    /// Issuer written into and required from every token
    pub issuer: String,
}

impl TokenServiceConfig {
    /// Creates an HS256 configuration with default durations
    pub fn new(secret: impl Into<String>) -> Self {
        let defaults = JwtConfig::new("");
        Self {
            jwt_secret: secret.into(),
            algorithm: Algorithm::HS256,
            token_lifetime: Duration::seconds(defaults.token_lifetime),
            renewal_limit: Duration::seconds(defaults.renewal_limit),
            issuer: defaults.issuer,
        }
    }

    pub fn with_token_lifetime(mut self, lifetime: Duration) -> Self {
        self.token_lifetime = lifetime;
        self
    }

    pub fn with_renewal_limit(mut self, limit: Duration) -> Self {
        self.renewal_limit = limit;
        self
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }
}

/// Parses an algorithm name, accepting only the HMAC family
pub fn parse_algorithm(name: &str) -> Result<Algorithm, TokenError> {
    let unsupported = || TokenError::UnsupportedAlgorithm {
        algorithm: name.to_string(),
    };
    match Algorithm::from_str(name.trim()).map_err(|_| unsupported())? {
        algorithm @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) => Ok(algorithm),
        _ => Err(unsupported()),
    }
}

impl TryFrom<&JwtConfig> for TokenServiceConfig {
    type Error = DomainError;

    fn try_from(config: &JwtConfig) -> Result<Self, Self::Error> {
        config
            .validate()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        Ok(Self {
            jwt_secret: config.secret.clone(),
            algorithm: parse_algorithm(&config.algorithm)?,
            token_lifetime: Duration::seconds(config.token_lifetime),
            renewal_limit: Duration::seconds(config.renewal_limit),
            issuer: config.issuer.clone(),
        })
    }
}
