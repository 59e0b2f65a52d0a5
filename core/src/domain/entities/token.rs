//! Token claims for JWT-based session authentication.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims structure for the JWT payload.
///
/// `email`, `exp` and `iss` form the wire contract; `iat` and `jti` are
/// optional on decode so tokens carrying only the three required claims
/// are still accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Authenticated principal
    pub email: String,

    /// Expiration timestamp (unix seconds)
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// Issued at timestamp (unix seconds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Unique token id, makes every issued token distinct
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

impl Claims {
    /// Creates claims for a token issued at `issued_at`
    ///
    /// # Arguments
    ///
    /// * `email` - The principal the token identifies
    /// * `issuer` - Fixed issuer string
    /// * `issued_at` - Issue instant
    /// * `lifetime` - Time until nominal expiration
    pub fn new(
        email: impl Into<String>,
        issuer: impl Into<String>,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        Self {
            email: email.into(),
            exp: (issued_at + lifetime).timestamp(),
            iss: issuer.into(),
            iat: Some(issued_at.timestamp()),
            jti: Some(Uuid::new_v4().to_string()),
        }
    }

    /// Expiration as a timestamp, `None` when `exp` is out of range
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }

    /// Whether the nominal expiration has passed at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims_expiration() {
        let issued_at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let claims = Claims::new("a@b.se", "foodloopz", issued_at, Duration::minutes(15));

        assert_eq!(claims.exp, issued_at.timestamp() + 900);
        assert_eq!(claims.iat, Some(issued_at.timestamp()));
        assert_eq!(claims.iss, "foodloopz");
        assert_eq!(claims.expires_at(), Some(issued_at + Duration::minutes(15)));
    }

    #[test]
    fn test_claims_are_unique() {
        let now = Utc::now();
        let first = Claims::new("a@b.se", "foodloopz", now, Duration::minutes(15));
        let second = Claims::new("a@b.se", "foodloopz", now, Duration::minutes(15));
        assert_ne!(first.jti, second.jti);
        assert_eq!(first.exp, second.exp);
    }

    #[test]
    fn test_is_expired_at() {
        let issued_at = Utc::now();
        let claims = Claims::new("a@b.se", "foodloopz", issued_at, Duration::seconds(60));

        assert!(!claims.is_expired_at(issued_at));
        assert!(claims.is_expired_at(issued_at + Duration::seconds(60)));
    }

    #[test]
    fn test_minimal_claims_deserialize() {
        let json = r#"{"email":"a@b.se","exp":1700000000,"iss":"foodloopz"}"#;
        let claims: Claims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.iat, None);
        assert_eq!(claims.jti, None);
    }
}
