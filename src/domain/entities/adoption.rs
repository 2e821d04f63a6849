//! Adoption requests filed against pet listings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::object_id::ObjectId;

/// Lifecycle state of an adoption request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdoptionStatus {
    Pending,
    Accepted,
    Rejected,
}

impl AdoptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdoptionStatus::Pending => "pending",
            AdoptionStatus::Accepted => "accepted",
            AdoptionStatus::Rejected => "rejected",
        }
    }

    /// Value the referenced pet's `adopted` flag takes when a request reaches this
    /// state. `None` for states that do not touch the pet.
    pub fn pet_adopted_flag(&self) -> Option<bool> {
        match self {
            AdoptionStatus::Pending => None,
            AdoptionStatus::Accepted => Some(true),
            AdoptionStatus::Rejected => Some(false),
        }
    }
}

impl fmt::Display for AdoptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdoptionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(AdoptionStatus::Pending),
            "accepted" => Ok(AdoptionStatus::Accepted),
            "rejected" => Ok(AdoptionStatus::Rejected),
            other => Err(format!("unknown adoption status '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AdoptionRequest {
    pub id: ObjectId,
    pub pet_id: ObjectId,
    pub requester_email: String,
    pub requester_name: String,
    pub phone: String,
    pub address: String,
    pub status: AdoptionStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAdoptionRequest {
    pub pet_id: ObjectId,
    pub requester_email: String,
    pub requester_name: String,
    pub phone: String,
    pub address: String,
}
