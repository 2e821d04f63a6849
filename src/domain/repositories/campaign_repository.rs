//! Repository trait for donation campaigns.

use crate::domain::entities::{Campaign, CampaignPatch, NewCampaign};
use crate::domain::object_id::ObjectId;
use crate::domain::repositories::{Page, PageRequest};
use crate::error::AppError;
use async_trait::async_trait;

/// Filter for campaign listings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CampaignFilter {
    pub owner_email: Option<String>,
}

/// Repository interface for donation campaigns.
///
/// The accumulated total is only changed through
/// [`crate::domain::repositories::DonatorRepository`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCampaignRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CampaignRepository: Send + Sync {
    /// Inserts a campaign with a zero total, not paused.
    async fn create(&self, new_campaign: NewCampaign) -> Result<Campaign, AppError>;

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Campaign>, AppError>;

    /// Lists campaigns newest first within the `page` window.
    async fn list(
        &self,
        filter: &CampaignFilter,
        page: PageRequest,
    ) -> Result<Page<Campaign>, AppError>;

    /// Applies a partial update and returns the updated campaign, or `None` if missing.
    async fn update(
        &self,
        id: &ObjectId,
        patch: CampaignPatch,
    ) -> Result<Option<Campaign>, AppError>;

    /// Flips `paused` in a single statement and returns the new value, or `None`
    /// if the campaign does not exist.
    async fn toggle_paused(&self, id: &ObjectId) -> Result<Option<bool>, AppError>;

    /// Returns `false` if the campaign does not exist.
    async fn set_paused(&self, id: &ObjectId, paused: bool) -> Result<bool, AppError>;

    /// Deletes a campaign. Its donation records are kept.
    ///
    /// Returns `false` if the campaign does not exist.
    async fn delete(&self, id: &ObjectId) -> Result<bool, AppError>;
}
