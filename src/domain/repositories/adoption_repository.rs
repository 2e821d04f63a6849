//! Repository trait for adoption requests.

use crate::domain::entities::{AdoptionRequest, AdoptionStatus, NewAdoptionRequest};
use crate::domain::object_id::ObjectId;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for adoption requests.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAdoptionRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdoptionRepository: Send + Sync {
    /// Inserts a new request in the `pending` state.
    async fn create(&self, request: NewAdoptionRequest) -> Result<AdoptionRequest, AppError>;

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<AdoptionRequest>, AppError>;

    /// Finds the pending request a requester already filed for a pet, if any.
    async fn find_pending(
        &self,
        pet_id: &ObjectId,
        requester_email: &str,
    ) -> Result<Option<AdoptionRequest>, AppError>;

    /// Lists requests filed against any of `pet_ids`, newest first.
    async fn list_for_pets(&self, pet_ids: &[ObjectId]) -> Result<Vec<AdoptionRequest>, AppError>;

    /// Records a final status on a pending request and sets the referenced pet's
    /// `adopted` flag to `pet_adopted`, atomically.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the request does not exist.
    /// Returns [`AppError::Conflict`] if it is no longer pending.
    /// Nothing is written in either case.
    /// Returns [`AppError::Internal`] on database errors.
    async fn resolve(
        &self,
        id: &ObjectId,
        status: AdoptionStatus,
        pet_adopted: bool,
    ) -> Result<(), AppError>;
}
