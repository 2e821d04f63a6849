//! DTOs for adoption request endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::ObjectId;
use crate::domain::entities::{AdoptionRequest, AdoptionStatus};

/// Request body for `POST /adoptions`.
///
/// The requester's email is taken from the bearer token.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdoptionRequest {
    pub pet_id: String,

    #[validate(length(min = 1, max = 100))]
    pub requester_name: String,

    #[validate(length(min = 5, max = 30))]
    pub phone: String,

    #[validate(length(min = 1, max = 300))]
    pub address: String,
}

/// Request body for `PATCH /adoption_requests/{id}`.
///
/// Kept as a string so unknown values surface as a `400` with the error body.
#[derive(Debug, Deserialize)]
pub struct UpdateAdoptionStatusRequest {
    pub status: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptionRequestResponse {
    pub id: ObjectId,
    pub pet_id: ObjectId,
    pub requester_email: String,
    pub requester_name: String,
    pub phone: String,
    pub address: String,
    pub status: AdoptionStatus,
    pub created_at: DateTime<Utc>,
}

impl From<AdoptionRequest> for AdoptionRequestResponse {
    fn from(r: AdoptionRequest) -> Self {
        Self {
            id: r.id,
            pet_id: r.pet_id,
            requester_email: r.requester_email,
            requester_name: r.requester_name,
            phone: r.phone,
            address: r.address,
            status: r.status,
            created_at: r.created_at,
        }
    }
}

/// Response for `POST /adoptions`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedAdoptionResponse {
    pub inserted_id: ObjectId,
    pub request: AdoptionRequestResponse,
}
