//! Save/update of users, including registration with an organization

use std::sync::Arc;

use chrono::Utc;
use fl_shared::utils::validation::{is_valid_email, validate_organization_number};
use tracing::{info, warn};

use crate::domain::entities::organization::{Account, Organization};
use crate::domain::entities::user::{Role, User};
use crate::domain::value_objects::SessionContext;
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::{OrganizationRepository, UserRepository};
use crate::services::auth::PasswordHasher;
use crate::services::token::TokenService;

/// Organization registered together with its first user
#[derive(Debug, Clone)]
pub struct OrganizationCommand {
    pub organization_number: u64,
    pub name: String,
    pub address: String,
    pub zip_code: String,
    pub city: String,
}

/// Input of save/update user
#[derive(Debug, Clone, Default)]
pub struct SaveUserCommand {
    /// Existing user to update; `None` registers a new user
    pub user_id: Option<i64>,
    pub email: String,
    /// Defaults to the email
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Required on registration, optional on update
    pub password: Option<String>,
    pub verify_password: Option<String>,
    pub organization: Option<OrganizationCommand>,
}

/// Saved user together with the session the caller continues with
///
/// The session differs from the inbound one when the saved email changed,
/// since tokens identify their principal by email.
#[derive(Debug, Clone)]
pub struct SavedUser {
    pub user: User,
    pub session: SessionContext,
}

pub struct UserService<U, O>
where
    U: UserRepository,
    O: OrganizationRepository,
{
    user_repository: Arc<U>,
    organization_repository: Arc<O>,
    token_service: Arc<TokenService>,
    password_hasher: PasswordHasher,
}

impl<U, O> UserService<U, O>
where
    U: UserRepository,
    O: OrganizationRepository,
{
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

    /// Register a new user or update the caller's own user
    ///
    /// * A logged in caller may only update itself.
    /// * An anonymous caller may only register.
    ///
    /// A changed email starts a new session for the updated user; the
    /// returned session must replace the caller's token.
    pub async fn save_update_user(&self, session: &SessionContext, command: SaveUserCommand) -> DomainResult<SavedUser> {
        if let Some(current) = session.user_id() {
            if command.user_id != Some(current) {
                warn!(user_id = current, target = ?command.user_id, "Refused update of another user");
                return Err(DomainError::forbidden("User could not be saved/updated"));
            }
        }

        let existing = match command.user_id {
            Some(id) => self.user_repository.find_by_id(id).await?,
            None => None,
        };

        match (existing, session.is_anonymous()) {
            (Some(user), false) => {
                let previous_email = user.email.clone();
                let user = self.update_user(user, command).await?;
                let session = if user.email == previous_email {
                    session.clone()
                } else {
                    info!(user_id = user.id, "Email changed, session token reissued");
                    self.token_service.start_session(user.id, &user.email, Utc::now())?
                };
                Ok(SavedUser { user, session })
            }
            (Some(_), true) => Err(AuthError::AuthenticationRequired.into()),
            (None, true) => Ok(SavedUser {
                user: self.register_user(command).await?,
                session: session.clone(),
            }),
            (None, false) => Err(DomainError::forbidden("User could not be saved")),
        }
    }

    /// A user's profile; any logged in caller may read it
    pub async fn user_profile(&self, session: &SessionContext, user_id: i64) -> DomainResult<User> {
        if session.is_anonymous() {
            return Err(AuthError::AuthenticationRequired.into());
        }
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))
    }

    /// An organization; any logged in caller may read it
    pub async fn organization(&self, session: &SessionContext, organization_id: i64) -> DomainResult<Organization> {
        if session.is_anonymous() {
            return Err(AuthError::AuthenticationRequired.into());
        }
        self.organization_repository
            .find_by_id(organization_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Organization"))
    }

    /// Update the organization the caller's account belongs to
    ///
    /// Any other organization is refused, including when the caller has no
    /// account at all.
    pub async fn update_organization(
        &self,
        session: &SessionContext,
        organization_id: i64,
        command: OrganizationCommand,
    ) -> DomainResult<Organization> {
        let user_id = session.user_id().ok_or(AuthError::AuthenticationRequired)?;

        let mut organization = self
            .organization_repository
            .find_by_id(organization_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Organization"))?;

        let account = self.organization_repository.find_account_by_user(user_id).await?;
        if account.map(|a| a.organization_id) != Some(organization.id) {
            warn!(user_id, organization_id, "Refused update of foreign organization");
            return Err(DomainError::forbidden("Organization could not be updated"));
        }

        validate_organization_number(command.organization_number).map_err(|_| {
            ValidationError::InvalidOrganizationNumber {
                number: command.organization_number,
            }
        })?;
        if command.name.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "name".to_string(),
            }
            .into());
        }

        organization.organization_number = command.organization_number;
        organization.name = command.name;
        organization.address = command.address;
        organization.zip_code = command.zip_code;
        organization.city = command.city;
        organization.updated_at = Utc::now();

        let organization = self.organization_repository.update(organization).await?;
        info!(user_id, organization_id = organization.id, "Organization updated");
        Ok(organization)
    }

    async fn update_user(&self, mut user: User, command: SaveUserCommand) -> DomainResult<User> {
        let email = command.email.trim();
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail.into());
        }

        user.email = email.to_string();
        if let Some(username) = command.username.filter(|u| !u.trim().is_empty()) {
            user.username = username;
        }
        if let Some(first_name) = command.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = command.last_name {
            user.last_name = last_name;
        }
        if let Some(password) = command.password.as_deref().filter(|p| !p.is_empty()) {
            if command.verify_password.as_deref() != Some(password) {
                return Err(AuthError::PasswordsDoNotMatch.into());
            }
            user.set_password_hash(self.password_hasher.hash(password).await?);
        }
        user.touch();

        let user = self.user_repository.update(user).await?;
        info!(user_id = user.id, "User updated");
        Ok(user)
    }

    async fn register_user(&self, command: SaveUserCommand) -> DomainResult<User> {
        let email = command.email.trim().to_string();
        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail.into());
        }
        if self.user_repository.exists_by_email(&email).await? {
            return Err(AuthError::UserAlreadyExists { email }.into());
        }

        let password = command
            .password
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| ValidationError::RequiredField {
                field: "password".to_string(),
            })?;
        if command.verify_password.as_deref() != Some(password) {
            return Err(AuthError::PasswordsDoNotMatch.into());
        }

        // Validate the organization before anything is written
        if let Some(org) = &command.organization {
            validate_organization_number(org.organization_number).map_err(|_| {
                ValidationError::InvalidOrganizationNumber {
                    number: org.organization_number,
                }
            })?;
            if org.name.trim().is_empty() {
                return Err(ValidationError::RequiredField {
                    field: "organization.name".to_string(),
                }
                .into());
            }
            if self
                .organization_repository
                .find_by_number(org.organization_number)
                .await?
                .is_some()
            {
                return Err(ValidationError::DuplicateValue {
                    field: "organizationNumber".to_string(),
                }
                .into());
            }
        }

        let username = command
            .username
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| email.clone());
        let hash = self.password_hasher.hash(password).await?;

        let mut user = User::new(email, username, hash).with_names(
            command.first_name.unwrap_or_default(),
            command.last_name.unwrap_or_default(),
        );
        if command.organization.is_some() {
            user.grant_role(Role::AccountAdmin);
        }
        user.grant_role(Role::Account);

        let user = self.user_repository.create(user).await?;

        if let Some(org) = command.organization {
            let organization = self
                .organization_repository
                .create(Organization::new(
                    org.organization_number,
                    org.name,
                    org.address,
                    org.zip_code,
                    org.city,
                ))
                .await?;
            self.organization_repository
                .create_account(Account::new(user.id, organization.id))
                .await?;
            info!(user_id = user.id, organization_id = organization.id, "Registered user with organization");
        } else {
            info!(user_id = user.id, "Registered user");
        }

        Ok(user)
    }
}
