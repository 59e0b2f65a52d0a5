//! Main token service implementation

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

use crate::domain::entities::token::Claims;
use crate::domain::value_objects::SessionContext;
use crate::errors::{DomainError, DomainResult, TokenError, ValidationError};

use super::config::TokenServiceConfig;

/// Verdict on an inbound token at a given instant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenAssessment {
    /// Before nominal expiration; keep using the token
    Current(Claims),
    /// Past expiration but within the renewal limit; issue a new token
    RenewalDue(Claims),
    /// Expired longer ago than the renewal limit
    Stale,
    /// Malformed, badly signed or from another issuer
    Invalid,
}

impl TokenAssessment {
    /// Claims of an acceptable token
    pub fn claims(&self) -> Option<&Claims> {
        match self {
            TokenAssessment::Current(claims) | TokenAssessment::RenewalDue(claims) => Some(claims),
            TokenAssessment::Stale | TokenAssessment::Invalid => None,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.claims().is_some()
    }
}

/// Stateless service issuing and verifying session tokens
///
/// Holds only immutable keys and settings, so a single instance is shared
/// through an `Arc` by every request handler and websocket session.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `config` - Token service configuration
    ///
    /// # Returns
    ///
    /// The service, or an error when the secret is empty or the algorithm
    /// is not an HMAC algorithm
    pub fn new(config: TokenServiceConfig) -> Result<Self, DomainError> {
        if config.jwt_secret.is_empty() {
            return Err(DomainError::internal("JWT secret must not be empty"));
        }
        if !matches!(
            config.algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(TokenError::UnsupportedAlgorithm {
                algorithm: format!("{:?}", config.algorithm),
            }
            .into());
        }

        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        // Expiration is judged against the renewal window, not by the library
        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss"]);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        })
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Issues a token for `email` expiring one token lifetime from now
    pub fn issue(&self, email: &str) -> DomainResult<String> {
        self.issue_at(email, Utc::now())
    }

    /// Issues a token as if the current instant were `now`
    pub fn issue_at(&self, email: &str, now: DateTime<Utc>) -> DomainResult<String> {
        let claims = self.claims_at(email, now)?;
        self.sign(&claims)
    }

    /// Builds the claims a token issued at `now` would carry
    pub fn claims_at(&self, email: &str, now: DateTime<Utc>) -> DomainResult<Claims> {
        if email.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "email".to_string(),
            }
            .into());
        }
        Ok(Claims::new(
            email,
            self.config.issuer.as_str(),
            now,
            self.config.token_lifetime,
        ))
    }

    /// Signs prepared claims
    pub fn sign(&self, claims: &Claims) -> DomainResult<String> {
        let header = Header::new(self.config.algorithm);
        encode(&header, claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Issues a token for a user and wraps it in an authenticated session
    /// whose expiry is the renewal deadline of that token
    pub fn start_session(&self, user_id: i64, email: &str, now: DateTime<Utc>) -> DomainResult<SessionContext> {
        let claims = self.claims_at(email, now)?;
        let token = self.sign(&claims)?;
        let expires_at = self
            .renewal_deadline(&claims)
            .ok_or_else(|| DomainError::internal("Token expiration out of range"))?;
        Ok(SessionContext::authenticated(user_id, email, token, expires_at))
    }

    /// Issues a fresh token; every call yields a distinct token string
    pub fn renew(&self, email: &str) -> DomainResult<String> {
        self.issue(email)
    }

    /// Email of a token that is current or due for renewal, `None` otherwise
    pub fn extract_email(&self, token: Option<&str>) -> Option<String> {
        self.extract_email_at(token, Utc::now())
    }

    pub fn extract_email_at(&self, token: Option<&str>, now: DateTime<Utc>) -> Option<String> {
        let token = token.filter(|t| !t.is_empty())?;
        match self.assess_at(token, now) {
            TokenAssessment::Current(claims) | TokenAssessment::RenewalDue(claims) => {
                Some(claims.email)
            }
            TokenAssessment::Stale | TokenAssessment::Invalid => None,
        }
    }

    /// Verifies the token and places its expiration in the renewal window
    pub fn assess(&self, token: &str) -> TokenAssessment {
        self.assess_at(token, Utc::now())
    }

    pub fn assess_at(&self, token: &str, now: DateTime<Utc>) -> TokenAssessment {
        let claims = match self.verify(token) {
            Ok(claims) => claims,
            Err(e) => {
                debug!(error = %e, "Rejected session token");
                return TokenAssessment::Invalid;
            }
        };

        let now_ts = now.timestamp();
        let renewal_floor = now_ts - self.config.renewal_limit.num_seconds();

        if now_ts < claims.exp {
            TokenAssessment::Current(claims)
        } else if claims.exp > renewal_floor {
            TokenAssessment::RenewalDue(claims)
        } else {
            debug!(email = %claims.email, exp = claims.exp, "Session token past renewal limit");
            TokenAssessment::Stale
        }
    }

    /// Instant after which a token with these claims can no longer be renewed
    pub fn renewal_deadline(&self, claims: &Claims) -> Option<DateTime<Utc>> {
        claims
            .expires_at()
            .map(|exp| exp + self.config.renewal_limit)
    }

    /// Signature, algorithm and issuer check; expiration is not enforced
    fn verify(&self, token: &str) -> DomainResult<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    DomainError::Token(TokenError::InvalidSignature)
                }
                _ => DomainError::Token(TokenError::InvalidTokenFormat),
            }
        })?;

        if data.claims.email.is_empty() {
            return Err(DomainError::Token(TokenError::InvalidTokenFormat));
        }
        Ok(data.claims)
    }
}
