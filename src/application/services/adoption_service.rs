//! Adoption requests: filing, listing and resolution.

use serde_json::json;
use std::sync::Arc;

use crate::domain::ObjectId;
use crate::domain::entities::{
    AdoptionRequest, AdoptionStatus, NewAdoptionRequest, PetFilter, normalize_email,
};
use crate::domain::repositories::{AdoptionRepository, PageRequest, PetRepository};
use crate::error::AppError;

/// Service for adoption requests.
///
/// A request moves from `pending` to `accepted` or `rejected` exactly once per
/// resolution call; resolving also sets the referenced pet's `adopted` flag.
pub struct AdoptionService {
    requests: Arc<dyn AdoptionRepository>,
    pets: Arc<dyn PetRepository>,
}

impl AdoptionService {
    pub fn new(requests: Arc<dyn AdoptionRepository>, pets: Arc<dyn PetRepository>) -> Self {
        Self { requests, pets }
    }

    /// Files a request for a pet on behalf of the caller.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the pet does not exist.
    /// Returns [`AppError::Validation`] if the pet is already adopted or belongs to
    /// the caller.
    /// Returns [`AppError::Conflict`] if the caller already has a pending request
    /// for this pet.
    pub async fn create_request(
        &self,
        mut request: NewAdoptionRequest,
    ) -> Result<AdoptionRequest, AppError> {
        request.requester_email = normalize_email(&request.requester_email);

        let pet = self
            .pets
            .find_by_id(&request.pet_id)
            .await?
            .ok_or_else(|| AppError::not_found("Pet not found", json!({ "id": request.pet_id })))?;

        if pet.adopted {
            return Err(AppError::bad_request(
                "Pet is already adopted",
                json!({ "petId": pet.id }),
            ));
        }

        if pet.is_owned_by(&request.requester_email) {
            return Err(AppError::bad_request(
                "Cannot request to adopt your own pet",
                json!({ "petId": pet.id }),
            ));
        }

        if let Some(existing) = self
            .requests
            .find_pending(&pet.id, &request.requester_email)
            .await?
        {
            return Err(AppError::conflict(
                "A pending request for this pet already exists",
                json!({ "requestId": existing.id }),
            ));
        }

        let created = self.requests.create(request).await?;
        tracing::info!(
            request_id = %created.id,
            pet_id = %created.pet_id,
            requester = %created.requester_email,
            "Adoption request filed"
        );
        Ok(created)
    }

    /// Lists every request filed against pets the caller owns.
    pub async fn list_for_owner(&self, owner_email: &str) -> Result<Vec<AdoptionRequest>, AppError> {
        let filter = PetFilter {
            owner_email: Some(normalize_email(owner_email)),
            ..Default::default()
        };
        let pet_ids: Vec<ObjectId> = self
            .pets
            .list(&filter, PageRequest::ALL)
            .await?
            .items
            .into_iter()
            .map(|p| p.id)
            .collect();

        if pet_ids.is_empty() {
            return Ok(Vec::new());
        }

        self.requests.list_for_pets(&pet_ids).await
    }

    /// Accepts or rejects a request.
    ///
    /// Allowed for the owner of the referenced pet or an admin (`caller_is_admin`).
    /// The request status and the pet's `adopted` flag are written together.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `status` is `pending`.
    /// Returns [`AppError::NotFound`] if the request or its pet does not exist.
    /// Returns [`AppError::Forbidden`] if the caller neither owns the pet nor is an admin.
    /// Returns [`AppError::Conflict`] if the request was already accepted or rejected.
    pub async fn resolve(
        &self,
        caller: &str,
        caller_is_admin: bool,
        id: &ObjectId,
        status: AdoptionStatus,
    ) -> Result<(), AppError> {
        let Some(pet_adopted) = status.pet_adopted_flag() else {
            return Err(AppError::bad_request(
                "Status must be 'accepted' or 'rejected'",
                json!({ "status": status.as_str() }),
            ));
        };

        let request = self
            .requests
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Adoption request not found", json!({ "id": id })))?;

        let pet = self.pets.find_by_id(&request.pet_id).await?.ok_or_else(|| {
            AppError::not_found(
                "Pet referenced by the request no longer exists",
                json!({ "petId": request.pet_id }),
            )
        })?;

        if !caller_is_admin && !pet.is_owned_by(caller) {
            return Err(AppError::forbidden(
                "Only the pet owner can resolve this request",
                json!({ "id": id }),
            ));
        }

        if request.status != AdoptionStatus::Pending {
            return Err(already_resolved(id, request.status));
        }

        self.requests.resolve(id, status, pet_adopted).await?;
        tracing::info!(
            request_id = %id,
            pet_id = %pet.id,
            status = %status,
            "Adoption request resolved"
        );
        Ok(())
    }
}

fn already_resolved(id: &ObjectId, status: AdoptionStatus) -> AppError {
    AppError::conflict(
        "Adoption request is already resolved",
        json!({ "id": id, "status": status.as_str() }),
    )
}
