//! Business logic services for the application layer.

pub mod adoption_service;
pub mod auth_service;
pub mod campaign_service;
pub mod donation_service;
pub mod pet_service;
pub mod user_service;

pub use adoption_service::AdoptionService;
pub use auth_service::{AuthService, Claims, IssuedToken};
pub use campaign_service::CampaignService;
pub use donation_service::{DonationReceipt, DonationService};
pub use pet_service::PetService;
pub use user_service::UserService;
