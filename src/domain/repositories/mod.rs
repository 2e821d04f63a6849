//! Repository trait definitions for the domain layer.
//!
//! One repository per collection. Implementations live in
//! `crate::infrastructure::persistence`; mocks are generated with `mockall` for
//! unit tests.
//!
//! Operations that touch two collections (adoption resolution, donation recording,
//! refunds) are single repository methods so the implementation can run them in one
//! transaction.
//!
//! - [`PetRepository`] - Pet listings
//! - [`AdoptionRepository`] - Adoption requests and their resolution
//! - [`UserRepository`] - Users and roles
//! - [`CampaignRepository`] - Donation campaigns
//! - [`DonatorRepository`] - Donation records and the campaign accumulator

pub mod adoption_repository;
pub mod campaign_repository;
pub mod donator_repository;
pub mod pet_repository;
pub mod user_repository;

pub use adoption_repository::AdoptionRepository;
pub use campaign_repository::{CampaignFilter, CampaignRepository};
pub use donator_repository::DonatorRepository;
pub use pet_repository::PetRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use adoption_repository::MockAdoptionRepository;
#[cfg(test)]
pub use campaign_repository::MockCampaignRepository;
#[cfg(test)]
pub use donator_repository::MockDonatorRepository;
#[cfg(test)]
pub use pet_repository::MockPetRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;

/// Skip/limit window for find-many queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub skip: i64,
    pub limit: i64,
}

impl PageRequest {
    /// Window covering every record.
    pub const ALL: PageRequest = PageRequest {
        skip: 0,
        limit: i64::MAX,
    };
}

/// One window of a find-many query plus the total count of matching records.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}
