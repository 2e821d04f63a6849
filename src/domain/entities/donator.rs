//! Donation records.

use chrono::{DateTime, Utc};

use crate::domain::object_id::ObjectId;

/// One successful donation towards a campaign.
///
/// A record exists once the payment provider has created an intent for it; the
/// intent id is kept for matching against provider events.
#[derive(Debug, Clone)]
pub struct Donator {
    pub id: ObjectId,
    pub user_id: ObjectId,
    pub email: String,
    pub campaign_id: ObjectId,
    /// Minor currency units.
    pub amount: i64,
    pub payment_intent_id: String,
    pub date: DateTime<Utc>,
}

impl Donator {
    pub fn is_owned_by(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email)
    }
}

#[derive(Debug, Clone)]
pub struct NewDonator {
    pub user_id: ObjectId,
    pub email: String,
    pub campaign_id: ObjectId,
    pub amount: i64,
    pub payment_intent_id: String,
}
