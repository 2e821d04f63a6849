//! Application layer services implementing business logic.
//!
//! Services own ownership checks, input rules and the orchestration of
//! repository and payment calls. They consume repository traits and give HTTP
//! handlers a narrow API.
//!
//! # Available Services
//!
//! - [`services::pet_service::PetService`] - Pet listings
//! - [`services::adoption_service::AdoptionService`] - Adoption requests and their resolution
//! - [`services::user_service::UserService`] - Registration and user administration
//! - [`services::campaign_service::CampaignService`] - Donation campaigns
//! - [`services::donation_service::DonationService`] - Donations and refunds
//! - [`services::auth_service::AuthService`] - Bearer token issuing and verification

pub mod services;
