//! DTOs for donation endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ObjectId;
use crate::domain::entities::Donator;

/// Request body for `POST /donations/donators/{id}`.
#[derive(Debug, Deserialize)]
pub struct DonateRequest {
    /// Major units, at most two decimals.
    pub amount: f64,
}

/// A donation record. `amount` is minor units.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonatorResponse {
    pub id: ObjectId,
    pub user_id: ObjectId,
    pub email: String,
    pub donation_campaign_id: ObjectId,
    pub amount: i64,
    pub payment_intent_id: String,
    pub date: DateTime<Utc>,
}

impl From<Donator> for DonatorResponse {
    fn from(d: Donator) -> Self {
        Self {
            id: d.id,
            user_id: d.user_id,
            email: d.email,
            donation_campaign_id: d.campaign_id,
            amount: d.amount,
            payment_intent_id: d.payment_intent_id,
            date: d.date,
        }
    }
}

/// Response for `POST /donations/donators/{id}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationResponse {
    pub donator: DonatorResponse,
    pub client_secret: Option<String>,
}
