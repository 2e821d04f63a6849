//! Repository trait for pet listings.

use crate::domain::entities::{NewPet, Pet, PetFilter, PetPatch};
use crate::domain::object_id::ObjectId;
use crate::domain::repositories::{Page, PageRequest};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for pet listings.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgPetRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PetRepository: Send + Sync {
    /// Inserts a new pet, not adopted, dated now.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_pet: NewPet) -> Result<Pet, AppError>;

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Pet>, AppError>;

    /// Lists pets matching `filter`, newest first, within the `page` window.
    ///
    /// `Page::total` counts every match, not just the returned window.
    async fn list(&self, filter: &PetFilter, page: PageRequest) -> Result<Page<Pet>, AppError>;

    /// Applies a partial update and returns the updated pet, or `None` if missing.
    async fn update(&self, id: &ObjectId, patch: PetPatch) -> Result<Option<Pet>, AppError>;

    /// Sets the adoption flag. Returns `false` if the pet does not exist.
    async fn set_adopted(&self, id: &ObjectId, adopted: bool) -> Result<bool, AppError>;

    /// Deletes a pet. Adoption requests referencing it are kept.
    ///
    /// Returns `false` if the pet does not exist.
    async fn delete(&self, id: &ObjectId) -> Result<bool, AppError>;
}
