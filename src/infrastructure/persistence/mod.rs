//! PostgreSQL repository implementations.
//!
//! Each collection is a table keyed by a 24-character hex id. Queries use the
//! runtime-checked `sqlx::query_as` API with `FromRow` row structs mapped into
//! domain entities.
//!
//! - [`PgPetRepository`] - Pet listings
//! - [`PgAdoptionRepository`] - Adoption requests
//! - [`PgUserRepository`] - Users
//! - [`PgCampaignRepository`] - Donation campaigns
//! - [`PgDonatorRepository`] - Donation records

pub mod pg_adoption_repository;
pub mod pg_campaign_repository;
pub mod pg_donator_repository;
pub mod pg_pet_repository;
pub mod pg_user_repository;

pub use pg_adoption_repository::PgAdoptionRepository;
pub use pg_campaign_repository::PgCampaignRepository;
pub use pg_donator_repository::PgDonatorRepository;
pub use pg_pet_repository::PgPetRepository;
pub use pg_user_repository::PgUserRepository;
