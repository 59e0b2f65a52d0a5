//! Marketplace service implementation

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::ad::{Ad, Category};
use crate::domain::value_objects::SessionContext;
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::{AdRepository, OrganizationRepository};

/// Number of ads on the front page
pub const TOP_ADS_LIMIT: usize = 5;

/// Input of save/update ad
#[derive(Debug, Clone, Default)]
pub struct SaveAdCommand {
    /// Ad to update; `None` creates a new ad
    pub ad_id: Option<i64>,
    pub heading: String,
    pub text: String,
    pub image: Option<String>,
    pub category_id: i64,
}

pub struct MarketplaceService<A, O>
where
    A: AdRepository,
    O: OrganizationRepository,
{
    ad_repository: Arc<A>,
    organization_repository: Arc<O>,
}

impl<A, O> MarketplaceService<A, O>
where
    A: AdRepository,
    O: OrganizationRepository,
{
    pub fn new(ad_repository: Arc<A>, organization_repository: Arc<O>) -> Self {
        Self {
            ad_repository,
            organization_repository,
        }
    }

    /// The newest ads, newest first
    pub async fn top_ads(&self) -> DomainResult<Vec<Ad>> {
        self.ad_repository.find_newest(TOP_ADS_LIMIT).await
    }

    /// Case-insensitive search on heading and text
    pub async fn search_ads(&self, phrase: &str, category_id: Option<i64>) -> DomainResult<Vec<Ad>> {
        let ads = self.ad_repository.search(phrase.trim(), category_id).await?;
        debug!(phrase = %phrase, ?category_id, hits = ads.len(), "Ad search");
        Ok(ads)
    }

    pub async fn view_ad(&self, id: i64) -> DomainResult<Ad> {
        self.ad_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Ad"))
    }

    /// Create an ad for the caller's organization, or update one the
    /// caller's account posted
    pub async fn save_update_ad(&self, session: &SessionContext, command: SaveAdCommand) -> DomainResult<Ad> {
        let user_id = session.user_id().ok_or(AuthError::AuthenticationRequired)?;

        if command.heading.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "heading".to_string(),
            }
            .into());
        }

        if self.ad_repository.find_category(command.category_id).await?.is_none() {
            return Err(DomainError::not_found("Category"));
        }

        let account = self
            .organization_repository
            .find_account_by_user(user_id)
            .await?
            .ok_or_else(|| DomainError::forbidden("An organization account is required to post ads"))?;

        match command.ad_id {
            Some(ad_id) => {
                let mut ad = self
                    .ad_repository
                    .find_by_id(ad_id)
                    .await?
                    .ok_or_else(|| DomainError::not_found("Ad"))?;
                if !ad.is_owned_by(account.id) {
                    warn!(ad_id, account_id = account.id, "Refused update of foreign ad");
                    return Err(DomainError::forbidden("Ad belongs to another account"));
                }
                ad.apply_changes(command.heading, command.text, command.image, command.category_id);
                let ad = self.ad_repository.update(ad).await?;
                info!(ad_id = ad.id, "Ad updated");
                Ok(ad)
            }
            None => {
                let ad = self
                    .ad_repository
                    .create(Ad::new(
                        command.heading,
                        command.text,
                        command.image,
                        command.category_id,
                        account.organization_id,
                        account.id,
                    ))
                    .await?;
                info!(ad_id = ad.id, organization_id = ad.organization_id, "Ad created");
                Ok(ad)
            }
        }
    }

    pub async fn categories(&self) -> DomainResult<Vec<Category>> {
        self.ad_repository.categories().await
    }
}
