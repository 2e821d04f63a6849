//! Repository trait for donation records.

use crate::domain::entities::{Donator, NewDonator};
use crate::domain::object_id::ObjectId;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for donation records.
///
/// Owns every change to a campaign's `donated_amount`, so the total always equals
/// the sum of the campaign's live records.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgDonatorRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DonatorRepository: Send + Sync {
    /// Inserts the record and increments the campaign total by its amount, atomically.
    ///
    /// The increment only applies while the campaign is not paused and the new
    /// total stays within `max_donation_amount`, so concurrent donations cannot
    /// overshoot the cap.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the campaign no longer exists.
    /// Returns [`AppError::Validation`] if it is paused or the amount exceeds what
    /// it still accepts. Nothing is written in either case.
    /// Returns [`AppError::Internal`] on database errors.
    async fn record_donation(&self, donation: NewDonator) -> Result<Donator, AppError>;

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Donator>, AppError>;

    /// Lists a campaign's donations, newest first.
    async fn list_by_campaign(&self, campaign_id: &ObjectId) -> Result<Vec<Donator>, AppError>;

    /// Lists a donor's donations, newest first.
    async fn list_by_email(&self, email: &str) -> Result<Vec<Donator>, AppError>;

    /// Deletes the record and decrements its campaign's total by the record's
    /// amount, atomically.
    ///
    /// Returns the deleted record, or `None` if it did not exist. A campaign that
    /// was deleted in the meantime is skipped.
    async fn refund(&self, id: &ObjectId) -> Result<Option<Donator>, AppError>;
}
