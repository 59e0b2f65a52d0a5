//! Ad repository trait covering advertisements and their categories.

use async_trait::async_trait;

use crate::domain::entities::ad::{Ad, Category};
use crate::errors::DomainError;

/// Repository trait for Ad and Category persistence
#[async_trait]
pub trait AdRepository: Send + Sync {
    /// The `limit` most recently created ads, newest first
    async fn find_newest(&self, limit: usize) -> Result<Vec<Ad>, DomainError>;

    /// Ads whose heading or text contains `phrase` (case-insensitive),
    /// optionally restricted to one category. Newest first.
    async fn search(&self, phrase: &str, category_id: Option<i64>) -> Result<Vec<Ad>, DomainError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Ad>, DomainError>;

    async fn create(&self, ad: Ad) -> Result<Ad, DomainError>;

    /// # Errors
    /// * `DomainError::NotFound` - No ad with `ad.id`
    async fn update(&self, ad: Ad) -> Result<Ad, DomainError>;

    /// All categories ordered by id
    async fn categories(&self) -> Result<Vec<Category>, DomainError>;

    async fn find_category(&self, id: i64) -> Result<Option<Category>, DomainError>;

    async fn create_category(&self, category: Category) -> Result<Category, DomainError>;
}
