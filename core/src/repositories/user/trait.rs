//! User repository trait defining the interface for user data persistence.
//!
//! The trait is async-first so a database-backed implementation can replace
//! the in-memory one without touching the services.

use async_trait::async_trait;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with the given id
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError>;

    /// Find a user by email, compared case-insensitively
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Persist a new user and return it with its assigned id
    ///
    /// # Errors
    /// * `ValidationError::DuplicateValue` - The email is already registered
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Replace an existing user
    ///
    /// # Errors
    /// * `DomainError::NotFound` - No user with `user.id`
    /// * `ValidationError::DuplicateValue` - The new email belongs to another user
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Check whether a user with the given email exists
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_email(email).await?.is_some())
    }
}
