//! Donation campaigns and their accumulated totals.
//!
//! All amounts are integer minor currency units (cents).

use chrono::{DateTime, Utc};

use crate::domain::object_id::ObjectId;

#[derive(Debug, Clone)]
pub struct Campaign {
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

impl Campaign {
    pub fn is_owned_by(&self, email: &str) -> bool {
        self.owner_email.eq_ignore_ascii_case(email)
    }

    /// Amount still accepted before the campaign reaches its cap.
    pub fn remaining(&self) -> i64 {
        (self.max_donation_amount - self.donated_amount).max(0)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.last_date_of_donation
    }
}

#[derive(Debug, Clone)]
pub struct NewCampaign {
    pub pet_name: String,
    pub picture: String,
    pub max_donation_amount: i64,
    pub last_date_of_donation: DateTime<Utc>,
    pub short_description: String,
    pub long_description: String,
    pub owner_email: String,
}

/// Owner-editable campaign fields. `donated_amount` is never patched directly.
#[derive(Debug, Clone, Default)]
pub struct CampaignPatch {
    pub pet_name: Option<String>,
    pub picture: Option<String>,
    pub max_donation_amount: Option<i64>,
    pub last_date_of_donation: Option<DateTime<Utc>>,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    pub paused: Option<bool>,
}

impl CampaignPatch {
    pub fn is_empty(&self) -> bool {
        self.pet_name.is_none()
            && self.picture.is_none()
            && self.max_donation_amount.is_none()
            && self.last_date_of_donation.is_none()
            && self.short_description.is_none()
            && self.long_description.is_none()
            && self.paused.is_none()
    }
}
