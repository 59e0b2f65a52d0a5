//! Per-request session state derived from the credential token.
//!
//! A `SessionContext` is resolved from the inbound token before a unit of
//! work, handed to business logic by value, and compared with the inbound
//! token afterwards to decide whether the credential carrier needs updating.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// An authenticated principal together with its effective token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedSession {
    pub user_id: i64,

    pub email: String,

    /// Token to hand back to the client; differs from the inbound token
    /// after login or renewal
    pub token: String,

    /// Instant after which the token can no longer be renewed
    /// (`exp + renewal_limit`)
    pub expires_at: DateTime<Utc>,
}

/// Session state of one request or websocket message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionContext {
    #[default]
    Anonymous,
    Authenticated(AuthenticatedSession),
}

impl SessionContext {
    pub fn authenticated(
        user_id: i64,
        email: impl Into<String>,
        token: impl Into<String>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        SessionContext::Authenticated(AuthenticatedSession {
            user_id,
            email: email.into(),
            token: token.into(),
            expires_at,
        })
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, SessionContext::Anonymous)
    }

    pub fn principal(&self) -> Option<&AuthenticatedSession> {
        match self {
            SessionContext::Authenticated(session) => Some(session),
            SessionContext::Anonymous => None,
        }
    }

    pub fn email(&self) -> Option<&str> {
        self.principal().map(|s| s.email.as_str())
    }

    pub fn token(&self) -> Option<&str> {
        self.principal().map(|s| s.token.as_str())
    }

    pub fn user_id(&self) -> Option<i64> {
        self.principal().map(|s| s.user_id)
    }

    /// Whether the effective token differs from the one the client sent
    pub fn token_changed(&self, inbound: Option<&str>) -> bool {
        self.token() != inbound.filter(|t| !t.is_empty())
    }
}
