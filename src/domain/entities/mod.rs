//! Core domain entities.
//!
//! Entities are plain data structures. Each has a `New*` companion for inserts and,
//! where owners may edit records, a `*Patch` for partial updates.
//!
//! - [`Pet`] - A pet listed for adoption
//! - [`AdoptionRequest`] - A request to adopt a listed pet
//! - [`User`] - A registered user and their role
//! - [`Campaign`] - A donation campaign with its running total
//! - [`Donator`] - A single donation towards a campaign

pub mod adoption;
pub mod campaign;
pub mod donator;
pub mod pet;
pub mod user;

pub use adoption::{AdoptionRequest, AdoptionStatus, NewAdoptionRequest};
pub use campaign::{Campaign, CampaignPatch, NewCampaign};
pub use donator::{Donator, NewDonator};
pub use pet::{NewPet, Pet, PetFilter, PetPatch};
pub use user::{NewUser, Role, User, normalize_email};
