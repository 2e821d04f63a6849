//! Pet listing service.

use serde_json::json;
use std::sync::Arc;

use crate::domain::ObjectId;
use crate::domain::entities::{NewPet, Pet, PetFilter, PetPatch};
use crate::domain::repositories::{Page, PageRequest, PetRepository};
use crate::error::AppError;

/// Service for pet listings.
///
/// Owner-scoped operations check that the caller's email matches the listing's
/// owner; admin operations skip that check and are only reachable behind the
/// admin gate.
pub struct PetService {
    repository: Arc<dyn PetRepository>,
}

impl PetService {
    pub fn new(repository: Arc<dyn PetRepository>) -> Self {
        Self { repository }
    }

    /// Lists pets newest first.
    pub async fn list_pets(
        &self,
        filter: &PetFilter,
        page: PageRequest,
    ) -> Result<Page<Pet>, AppError> {
        self.repository.list(filter, page).await
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the pet does not exist.
    pub async fn get_pet(&self, id: &ObjectId) -> Result<Pet, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| pet_not_found(id))
    }

    /// Lists the caller's own pets.
    pub async fn list_owned(&self, owner_email: &str) -> Result<Vec<Pet>, AppError> {
        let filter = PetFilter {
            owner_email: Some(owner_email.to_string()),
            ..Default::default()
        };
        Ok(self.repository.list(&filter, PageRequest::ALL).await?.items)
    }

    pub async fn create_pet(&self, new_pet: NewPet) -> Result<Pet, AppError> {
        let pet = self.repository.create(new_pet).await?;
        tracing::info!(pet_id = %pet.id, owner = %pet.owner_email, "Pet listed");
        Ok(pet)
    }

    /// Sets the adoption flag on one of the caller's pets.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the pet does not exist.
    /// Returns [`AppError::Forbidden`] if the caller does not own it.
    pub async fn set_adopted_as_owner(
        &self,
        caller: &str,
        id: &ObjectId,
        adopted: bool,
    ) -> Result<(), AppError> {
        self.owned_pet(caller, id).await?;
        self.set_adopted(id, adopted).await
    }

    /// Partially updates one of the caller's pets.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the patch is empty.
    /// Returns [`AppError::NotFound`] if the pet does not exist.
    /// Returns [`AppError::Forbidden`] if the caller does not own it.
    pub async fn update_as_owner(
        &self,
        caller: &str,
        id: &ObjectId,
        patch: PetPatch,
    ) -> Result<Pet, AppError> {
        if patch.is_empty() {
            return Err(AppError::bad_request("No fields to update", json!({})));
        }

        self.owned_pet(caller, id).await?;

        self.repository
            .update(id, patch)
            .await?
            .ok_or_else(|| pet_not_found(id))
    }

    /// Deletes one of the caller's pets.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the pet does not exist.
    /// Returns [`AppError::Forbidden`] if the caller does not own it.
    pub async fn delete_as_owner(&self, caller: &str, id: &ObjectId) -> Result<(), AppError> {
        self.owned_pet(caller, id).await?;
        self.delete(id).await
    }

    /// Sets the adoption flag regardless of ownership.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the pet does not exist.
    pub async fn set_adopted(&self, id: &ObjectId, adopted: bool) -> Result<(), AppError> {
        if !self.repository.set_adopted(id, adopted).await? {
            return Err(pet_not_found(id));
        }
        tracing::info!(pet_id = %id, adopted, "Pet adoption flag updated");
        Ok(())
    }

    /// Deletes a pet regardless of ownership.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the pet does not exist.
    pub async fn delete(&self, id: &ObjectId) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(pet_not_found(id));
        }
        tracing::info!(pet_id = %id, "Pet deleted");
        Ok(())
    }

    async fn owned_pet(&self, caller: &str, id: &ObjectId) -> Result<Pet, AppError> {
        let pet = self.get_pet(id).await?;
        if !pet.is_owned_by(caller) {
            return Err(AppError::forbidden(
                "Pet belongs to another user",
                json!({ "id": id }),
            ));
        }
        Ok(pet)
    }
}

fn pet_not_found(id: &ObjectId) -> AppError {
    AppError::not_found("Pet not found", json!({ "id": id }))
}
