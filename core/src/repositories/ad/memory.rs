//! In-memory implementation of AdRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::ad::{Ad, Category};
use crate::errors::DomainError;

use super::trait_::AdRepository;

#[derive(Default)]
struct Store {
    ads: HashMap<i64, Ad>,
    categories: HashMap<i64, Category>,
}

pub struct InMemoryAdRepository {
    store: Arc<RwLock<Store>>,
    next_ad_id: AtomicI64,
    next_category_id: AtomicI64,
}

impl InMemoryAdRepository {
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(Store::default())),
            next_ad_id: AtomicI64::new(1),
            next_category_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryAdRepository {
    fn default() -> Self {
        Self::new()
    }
}

// Ids are assigned in creation order, so they break timestamp ties.
fn newest_first(ads: &mut [Ad]) {
    ads.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
}

#[async_trait]
impl AdRepository for InMemoryAdRepository {
    async fn find_newest(&self, limit: usize) -> Result<Vec<Ad>, DomainError> {
        let store = self.store.read().await;
        let mut ads: Vec<Ad> = store.ads.values().cloned().collect();
        newest_first(&mut ads);
        ads.truncate(limit);
        Ok(ads)
    }

    async fn search(&self, phrase: &str, category_id: Option<i64>) -> Result<Vec<Ad>, DomainError> {
        let store = self.store.read().await;
        let mut ads: Vec<Ad> = store
            .ads
            .values()
            .filter(|ad| category_id.map_or(true, |id| ad.category_id == id))
            .filter(|ad| ad.matches_phrase(phrase))
            .cloned()
            .collect();
        newest_first(&mut ads);
        Ok(ads)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Ad>, DomainError> {
        let store = self.store.read().await;
        Ok(store.ads.get(&id).cloned())
    }

    async fn create(&self, mut ad: Ad) -> Result<Ad, DomainError> {
        let mut store = self.store.write().await;
        ad.id = self.next_ad_id.fetch_add(1, Ordering::SeqCst);
        store.ads.insert(ad.id, ad.clone());
        Ok(ad)
    }

    async fn update(&self, ad: Ad) -> Result<Ad, DomainError> {
        let mut store = self.store.write().await;
        if !store.ads.contains_key(&ad.id) {
            return Err(DomainError::not_found("Ad"));
        }
        store.ads.insert(ad.id, ad.clone());
        Ok(ad)
    }

    async fn categories(&self) -> Result<Vec<Category>, DomainError> {
        let store = self.store.read().await;
        let mut categories: Vec<Category> = store.categories.values().cloned().collect();
        categories.sort_by_key(|c| c.id);
        Ok(categories)
    }

    async fn find_category(&self, id: i64) -> Result<Option<Category>, DomainError> {
        let store = self.store.read().await;
        Ok(store.categories.get(&id).cloned())
    }

    async fn create_category(&self, mut category: Category) -> Result<Category, DomainError> {
        let mut store = self.store.write().await;
        category.id = self.next_category_id.fetch_add(1, Ordering::SeqCst);
        store.categories.insert(category.id, category.clone());
        Ok(category)
    }
}
