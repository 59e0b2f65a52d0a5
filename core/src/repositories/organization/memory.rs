//! In-memory implementation of OrganizationRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::organization::{Account, Organization};
use crate::errors::{DomainError, ValidationError};

use super::trait_::OrganizationRepository;

#[derive(Default)]
struct Store {
    organizations: HashMap<i64, Organization>,
    accounts: HashMap<i64, Account>,
}

pub struct InMemoryOrganizationRepository {
    store: Arc<RwLock<Store>>,
    next_organization_id: AtomicI64,
    next_account_id: AtomicI64,
}

impl InMemoryOrganizationRepository {
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(Store::default())),
            next_organization_id: AtomicI64::new(1),
            next_account_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryOrganizationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrganizationRepository for InMemoryOrganizationRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Organization>, DomainError> {
        let store = self.store.read().await;
        Ok(store.organizations.get(&id).cloned())
    }

    async fn find_by_number(&self, organization_number: u64) -> Result<Option<Organization>, DomainError> {
        let store = self.store.read().await;
        Ok(store
            .organizations
            .values()
            .find(|o| o.organization_number == organization_number)
            .cloned())
    }

    async fn create(&self, mut organization: Organization) -> Result<Organization, DomainError> {
        let mut store = self.store.write().await;

        if store
            .organizations
            .values()
            .any(|o| o.organization_number == organization.organization_number)
        {
            return Err(ValidationError::DuplicateValue {
                field: "organizationNumber".to_string(),
            }
            .into());
        }

        organization.id = self.next_organization_id.fetch_add(1, Ordering::SeqCst);
        store.organizations.insert(organization.id, organization.clone());
        Ok(organization)
    }

    async fn update(&self, organization: Organization) -> Result<Organization, DomainError> {
        let mut store = self.store.write().await;

        if !store.organizations.contains_key(&organization.id) {
            return Err(DomainError::not_found("Organization"));
        }
        if store
            .organizations
            .values()
            .any(|o| o.id != organization.id && o.organization_number == organization.organization_number)
        {
            return Err(ValidationError::DuplicateValue {
                field: "organizationNumber".to_string(),
            }
            .into());
        }

        store.organizations.insert(organization.id, organization.clone());
        Ok(organization)
    }

    async fn create_account(&self, mut account: Account) -> Result<Account, DomainError> {
        let mut store = self.store.write().await;

        if !store.organizations.contains_key(&account.organization_id) {
            return Err(DomainError::not_found("Organization"));
        }
        if store.accounts.values().any(|a| a.user_id == account.user_id) {
            return Err(ValidationError::DuplicateValue {
                field: "account".to_string(),
            }
            .into());
        }

        account.id = self.next_account_id.fetch_add(1, Ordering::SeqCst);
        store.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find_account_by_user(&self, user_id: i64) -> Result<Option<Account>, DomainError> {
        let store = self.store.read().await;
        Ok(store.accounts.values().find(|a| a.user_id == user_id).cloned())
    }
}
