//! Organization repository trait covering organizations and the accounts
//! that attach users to them.

use async_trait::async_trait;

use crate::domain::entities::organization::{Account, Organization};
use crate::errors::DomainError;

/// Repository trait for Organization and Account persistence
#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Organization>, DomainError>;

    async fn find_by_number(&self, organization_number: u64) -> Result<Option<Organization>, DomainError>;

    /// Persist a new organization
    ///
    /// # Errors
    /// * `ValidationError::DuplicateValue` - The organization number is taken
    async fn create(&self, organization: Organization) -> Result<Organization, DomainError>;

    /// Replace a stored organization
    ///
    /// # Errors
    /// * `DomainError::NotFound` - No organization with this id
    /// * `ValidationError::DuplicateValue` - Another organization holds the number
    async fn update(&self, organization: Organization) -> Result<Organization, DomainError>;

    /// Persist a new account
    ///
    /// # Errors
    /// * `DomainError::NotFound` - The referenced organization does not exist
    /// * `ValidationError::DuplicateValue` - The user already has an account
    async fn create_account(&self, account: Account) -> Result<Account, DomainError>;

    /// The account of a user, if the user belongs to an organization
    async fn find_account_by_user(&self, user_id: i64) -> Result<Option<Account>, DomainError>;
}
