//! DTOs for donation campaign endpoints.
//!
//! Caps are submitted as decimal major units; responses report stored minor units.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::api::dto::pagination::PaginationParams;
use crate::domain::ObjectId;
use crate::domain::entities::{Campaign, CampaignPatch, NewCampaign};
use crate::error::AppError;
use crate::utils::money::to_minor_units;

/// Query parameters for `GET /campaigns`.
pub type CampaignListQuery = PaginationParams;

/// Request body for `POST /donation_campaigns`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaignRequest {
    #[validate(length(min = 1, max = 100))]
    pub pet_name: String,

    #[validate(url(message = "Invalid picture URL"))]
    pub picture: String,

    /// Major units, at most two decimals.
    pub max_donation_amount: f64,

    pub last_date_of_donation: DateTime<Utc>,

    #[validate(length(min = 1, max = 300))]
    pub short_description: String,

    #[validate(length(min = 1, max = 5000))]
    pub long_description: String,
}

impl CreateCampaignRequest {
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the cap is not a valid amount or the
    /// last donation date has already passed.
    pub fn into_new_campaign(self, owner_email: String) -> Result<NewCampaign, AppError> {
        if self.last_date_of_donation <= Utc::now() {
            return Err(AppError::bad_request(
                "lastDateOfDonation must be in the future",
                json!({ "lastDateOfDonation": self.last_date_of_donation }),
            ));
        }

        Ok(NewCampaign {
            max_donation_amount: minor("maxDonationAmount", self.max_donation_amount)?,
            pet_name: self.pet_name,
            picture: self.picture,
            last_date_of_donation: self.last_date_of_donation,
            short_description: self.short_description,
            long_description: self.long_description,
            owner_email,
        })
    }
}

/// Request body for `PATCH /donation_campaigns/{id}`.
///
/// All fields are optional; only provided fields are changed.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCampaignRequest {
    #[validate(length(min = 1, max = 100))]
    pub pet_name: Option<String>,

    #[validate(url(message = "Invalid picture URL"))]
    pub picture: Option<String>,

    pub max_donation_amount: Option<f64>,

    pub last_date_of_donation: Option<DateTime<Utc>>,

    #[validate(length(min = 1, max = 300))]
    pub short_description: Option<String>,

    #[validate(length(min = 1, max = 5000))]
    pub long_description: Option<String>,

    pub paused: Option<bool>,
}

impl UpdateCampaignRequest {
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the cap is not a valid amount.
    pub fn into_patch(self) -> Result<CampaignPatch, AppError> {
        let max_donation_amount = self
            .max_donation_amount
            .map(|v| minor("maxDonationAmount", v))
            .transpose()?;

        Ok(CampaignPatch {
            pet_name: self.pet_name,
            picture: self.picture,
            max_donation_amount,
            last_date_of_donation: self.last_date_of_donation,
            short_description: self.short_description,
            long_description: self.long_description,
            paused: self.paused,
        })
    }
}

/// Request body for `PATCH /admin/campaigns/{id}/pause`.
#[derive(Debug, Deserialize)]
pub struct SetPausedRequest {
    pub paused: bool,
}

/// Response for the pause toggle.
#[derive(Debug, Serialize)]
pub struct PausedResponse {
    pub paused: bool,
}

/// A campaign. Amounts are minor units.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignResponse {
    pub id: ObjectId,
    pub pet_name: String,
    pub picture: String,
    pub max_donation_amount: i64,
    pub last_date_of_donation: DateTime<Utc>,
    pub short_description: String,
    pub long_description: String,
    pub created_at: DateTime<Utc>,
    pub donated_amount: i64,
    pub paused: bool,
    pub owner_email: String,
}

impl From<Campaign> for CampaignResponse {
    fn from(c: Campaign) -> Self {
        Self {
            id: c.id,
            pet_name: c.pet_name,
            picture: c.picture,
            max_donation_amount: c.max_donation_amount,
            last_date_of_donation: c.last_date_of_donation,
            short_description: c.short_description,
            long_description: c.long_description,
            created_at: c.created_at,
            donated_amount: c.donated_amount,
            paused: c.paused,
            owner_email: c.owner_email,
        }
    }
}

/// Response for `GET /campaigns`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignListResponse {
    pub campaigns: Vec<CampaignResponse>,
    pub next_page: Option<u32>,
    pub total: i64,
}

/// Response for `POST /donation_campaigns`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedCampaignResponse {
    pub inserted_id: ObjectId,
    pub campaign: CampaignResponse,
}

pub(crate) fn minor(field: &'static str, amount: f64) -> Result<i64, AppError> {
    to_minor_units(amount).map_err(|e| {
        AppError::bad_request(
            format!("Invalid {field}"),
            json!({ "field": field, "reason": e.to_string() }),
        )
    })
}
