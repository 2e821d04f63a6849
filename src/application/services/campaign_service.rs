//! Donation campaigns: creation, owner edits and pausing.

use serde_json::json;
use std::sync::Arc;

use crate::domain::ObjectId;
use crate::domain::entities::{Campaign, CampaignPatch, Donator, NewCampaign};
use crate::domain::repositories::{
    CampaignFilter, CampaignRepository, DonatorRepository, Page, PageRequest,
};
use crate::error::AppError;

/// Service for donation campaigns.
pub struct CampaignService {
    campaigns: Arc<dyn CampaignRepository>,
    donators: Arc<dyn DonatorRepository>,
}

impl CampaignService {
    pub fn new(
        campaigns: Arc<dyn CampaignRepository>,
        donators: Arc<dyn DonatorRepository>,
    ) -> Self {
        Self {
            campaigns,
            donators,
        }
    }

    /// Lists campaigns newest first.
    pub async fn list_campaigns(&self, page: PageRequest) -> Result<Page<Campaign>, AppError> {
        self.campaigns.list(&CampaignFilter::default(), page).await
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the campaign does not exist.
    pub async fn get_campaign(&self, id: &ObjectId) -> Result<Campaign, AppError> {
        self.campaigns
            .find_by_id(id)
            .await?
            .ok_or_else(|| campaign_not_found(id))
    }

    pub async fn list_owned(&self, owner_email: &str) -> Result<Vec<Campaign>, AppError> {
        let filter = CampaignFilter {
            owner_email: Some(owner_email.to_string()),
        };
        Ok(self.campaigns.list(&filter, PageRequest::ALL).await?.items)
    }

    /// Creates a campaign with a zero total.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the cap is not positive.
    pub async fn create_campaign(&self, new_campaign: NewCampaign) -> Result<Campaign, AppError> {
        if new_campaign.max_donation_amount <= 0 {
            return Err(AppError::bad_request(
                "maxDonationAmount must be positive",
                json!({ "maxDonationAmount": new_campaign.max_donation_amount }),
            ));
        }

        let campaign = self.campaigns.create(new_campaign).await?;
        tracing::info!(
            campaign_id = %campaign.id,
            owner = %campaign.owner_email,
            max_donation_amount = campaign.max_donation_amount,
            "Campaign created"
        );
        Ok(campaign)
    }

    /// Partially updates one of the caller's campaigns.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the patch is empty or lowers the cap
    /// below zero.
    /// Returns [`AppError::NotFound`] if the campaign does not exist.
    /// Returns [`AppError::Forbidden`] if the caller does not own it.
    pub async fn update_as_owner(
        &self,
        caller: &str,
        id: &ObjectId,
        patch: CampaignPatch,
    ) -> Result<Campaign, AppError> {
        if patch.is_empty() {
            return Err(AppError::bad_request("No fields to update", json!({})));
        }

        if let Some(max) = patch.max_donation_amount
            && max <= 0
        {
            return Err(AppError::bad_request(
                "maxDonationAmount must be positive",
                json!({ "maxDonationAmount": max }),
            ));
        }

        self.owned_campaign(caller, id).await?;

        let updated = self
            .campaigns
            .update(id, patch)
            .await?
            .ok_or_else(|| campaign_not_found(id))?;
        tracing::info!(campaign_id = %id, "Campaign updated");
        Ok(updated)
    }

    /// Flips the paused flag of one of the caller's campaigns and returns the new value.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the campaign does not exist.
    /// Returns [`AppError::Forbidden`] if the caller does not own it.
    pub async fn toggle_pause_as_owner(
        &self,
        caller: &str,
        id: &ObjectId,
    ) -> Result<bool, AppError> {
        self.owned_campaign(caller, id).await?;

        let paused = self
            .campaigns
            .toggle_paused(id)
            .await?
            .ok_or_else(|| campaign_not_found(id))?;
        tracing::info!(campaign_id = %id, paused, "Campaign pause toggled");
        Ok(paused)
    }

    /// Lists the donations made to a campaign. Owner or admin only.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the campaign does not exist.
    /// Returns [`AppError::Forbidden`] if the caller is neither owner nor admin.
    pub async fn donators_of(
        &self,
        caller: &str,
        caller_is_admin: bool,
        id: &ObjectId,
    ) -> Result<Vec<Donator>, AppError> {
        let campaign = self.get_campaign(id).await?;
        if !caller_is_admin && !campaign.is_owned_by(caller) {
            return Err(not_owner(id));
        }
        self.donators.list_by_campaign(id).await
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the campaign does not exist.
    pub async fn set_paused(&self, id: &ObjectId, paused: bool) -> Result<(), AppError> {
        if !self.campaigns.set_paused(id, paused).await? {
            return Err(campaign_not_found(id));
        }
        tracing::info!(campaign_id = %id, paused, "Campaign paused flag set");
        Ok(())
    }

    /// Deletes a campaign. Its donation records are kept.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the campaign does not exist.
    pub async fn delete(&self, id: &ObjectId) -> Result<(), AppError> {
        if !self.campaigns.delete(id).await? {
            return Err(campaign_not_found(id));
        }
        tracing::info!(campaign_id = %id, "Campaign deleted");
        Ok(())
    }

    async fn owned_campaign(&self, caller: &str, id: &ObjectId) -> Result<Campaign, AppError> {
        let campaign = self.get_campaign(id).await?;
        if !campaign.is_owned_by(caller) {
            return Err(not_owner(id));
        }
        Ok(campaign)
    }
}

fn campaign_not_found(id: &ObjectId) -> AppError {
    AppError::not_found("Campaign not found", json!({ "id": id }))
}

fn not_owner(id: &ObjectId) -> AppError {
    AppError::forbidden("Campaign belongs to another user", json!({ "id": id }))
}
