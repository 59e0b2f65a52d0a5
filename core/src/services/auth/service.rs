//! Main authentication service implementation

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::domain::entities::user::User;
use crate::domain::value_objects::{AuthProfile, SessionContext};
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::{OrganizationRepository, UserRepository};
use crate::services::token::{TokenAssessment, TokenService};

use super::password::PasswordHasher;

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub session: SessionContext,
    pub profile: AuthProfile,
}

/// Input of a password change
#[derive(Debug, Clone)]
pub struct ChangePasswordCommand {
    pub old_password: String,
    pub new_password: String,
    pub verify_password: String,
}

/// Authentication service for login, session resolution and passwords
pub struct AuthService<U, O>
where
    U: UserRepository,
    O: OrganizationRepository,
{
    /// User repository
    user_repository: Arc<U>,
    /// Organization repository, used for the account of a user
    organization_repository: Arc<O>,
    /// Token service for JWT management
    token_service: Arc<TokenService>,
    password_hasher: PasswordHasher,
}

impl<U, O> AuthService<U, O>
where
    U: UserRepository,
    O: OrganizationRepository,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user data
    /// * `organization_repository` - Repository for organizations and accounts
    /// * `token_service` - Service for JWT token management
    /// * `password_hasher` - bcrypt hasher
    pub fn new(
        user_repository: Arc<U>,
        organization_repository: Arc<O>,
        token_service: Arc<TokenService>,
        password_hasher: PasswordHasher,
    ) -> Self {
        Self {
            user_repository,
            organization_repository,
            token_service,
            password_hasher,
        }
    }

    pub fn token_service(&self) -> &TokenService {
        &self.token_service
    }

    /// Authenticate with email and password
    ///
    /// Unknown email, inactive user and wrong password all fail with
    /// `AuthError::AuthenticationFailed`.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<LoginOutcome> {
        let user = match self.user_repository.find_by_email(email.trim()).await? {
            Some(user) if user.is_active => user,
            Some(_) => {
                info!(email = %email, "Login rejected for inactive user");
                return Err(AuthError::AuthenticationFailed.into());
            }
            None => {
                info!(email = %email, "Login rejected for unknown email");
                return Err(AuthError::AuthenticationFailed.into());
            }
        };

        if !self.password_hasher.verify(password, &user.password_hash).await {
            info!(user_id = user.id, "Login rejected, wrong password");
            return Err(AuthError::AuthenticationFailed.into());
        }

        let session = self.start_session(&user, Utc::now())?;
        let profile = self.profile_for(&user).await?;
        info!(user_id = user.id, "User logged in");

        Ok(LoginOutcome { session, profile })
    }

    /// Turn the inbound token into a session, renewing it when due
    ///
    /// Never fails: every problem with the token or the user yields an
    /// anonymous session.
    pub async fn resolve_session(&self, token: Option<&str>) -> SessionContext {
        self.resolve_session_at(token, Utc::now()).await
    }

    pub async fn resolve_session_at(&self, token: Option<&str>, now: DateTime<Utc>) -> SessionContext {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return SessionContext::Anonymous;
        };

        let (claims, renew) = match self.token_service.assess_at(token, now) {
            TokenAssessment::Current(claims) => (claims, false),
            TokenAssessment::RenewalDue(claims) => (claims, true),
            TokenAssessment::Stale | TokenAssessment::Invalid => return SessionContext::Anonymous,
        };

        let user = match self.user_repository.find_by_email(&claims.email).await {
            Ok(Some(user)) if user.is_active => user,
            Ok(_) => {
                debug!(email = %claims.email, "Token principal unknown or inactive");
                return SessionContext::Anonymous;
            }
            Err(e) => {
                warn!(error = %e, "User lookup failed while resolving session");
                return SessionContext::Anonymous;
            }
        };

        if renew {
            return match self.start_session(&user, now) {
                Ok(session) => {
                    debug!(user_id = user.id, "Session token renewed");
                    session
                }
                Err(e) => {
                    warn!(error = %e, "Token renewal failed");
                    SessionContext::Anonymous
                }
            };
        }

        match self.token_service.renewal_deadline(&claims) {
            Some(expires_at) => SessionContext::authenticated(user.id, user.email, token, expires_at),
            None => SessionContext::Anonymous,
        }
    }

    /// Ends the session; the caller clears the credential carrier
    pub fn logout(&self, session: &SessionContext) -> SessionContext {
        if let Some(user_id) = session.user_id() {
            info!(user_id, "User logged out");
        }
        SessionContext::Anonymous
    }

    /// Profile of the current principal, anonymous form when logged out
    pub async fn profile(&self, session: &SessionContext) -> DomainResult<AuthProfile> {
        let Some(user_id) = session.user_id() else {
            return Ok(AuthProfile::anonymous());
        };
        match self.user_repository.find_by_id(user_id).await? {
            Some(user) => self.profile_for(&user).await,
            None => Ok(AuthProfile::anonymous()),
        }
    }

    /// Change the password of the logged in user
    pub async fn change_password(
        &self,
        session: &SessionContext,
        command: ChangePasswordCommand,
    ) -> DomainResult<()> {
        let user_id = session.user_id().ok_or(AuthError::AuthenticationRequired)?;
        let mut user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;

        if !self
            .password_hasher
            .verify(&command.old_password, &user.password_hash)
            .await
        {
            return Err(AuthError::AuthenticationFailed.into());
        }
        if command.new_password.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "newPassword".to_string(),
            }
            .into());
        }
        if command.new_password != command.verify_password {
            return Err(AuthError::PasswordsDoNotMatch.into());
        }

        let hash = self.password_hasher.hash(&command.new_password).await?;
        user.set_password_hash(hash);
        self.user_repository.update(user).await?;
        info!(user_id, "Password changed");
        Ok(())
    }

    /// Password reset needs email delivery, which this backend does not
    /// provide; the request always fails the same way, whether or not the
    /// email is registered.
    pub async fn reset_password(&self, email: &str) -> DomainResult<()> {
        info!(email = %email, "Password reset requested but unavailable");
        Err(AuthError::PasswordResetUnavailable.into())
    }

    /// Issue a fresh token for `user` and wrap it in a session
    fn start_session(&self, user: &User, now: DateTime<Utc>) -> DomainResult<SessionContext> {
        self.token_service.start_session(user.id, &user.email, now)
    }

    async fn profile_for(&self, user: &User) -> DomainResult<AuthProfile> {
        let account = self.organization_repository.find_account_by_user(user.id).await?;
        Ok(AuthProfile::for_user(user, account.map(|a| a.organization_id)))
    }
}
