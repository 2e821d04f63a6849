//! Shared application state injected into every handler.

use chrono::Duration;
use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{
    AdoptionService, AuthService, CampaignService, DonationService, PetService, UserService,
};
use crate::domain::repositories::{
    AdoptionRepository, CampaignRepository, DonatorRepository, PetRepository, UserRepository,
};
use crate::infrastructure::payment::PaymentGateway;
use crate::infrastructure::persistence::{
    PgAdoptionRepository, PgCampaignRepository, PgDonatorRepository, PgPetRepository,
    PgUserRepository,
};

/// One implementation per collection.
#[derive(Clone)]
pub struct Repositories {
    pub pets: Arc<dyn PetRepository>,
    pub adoptions: Arc<dyn AdoptionRepository>,
    pub users: Arc<dyn UserRepository>,
    pub campaigns: Arc<dyn CampaignRepository>,
    pub donators: Arc<dyn DonatorRepository>,
}

impl Repositories {
    /// PostgreSQL repositories sharing one pool.
    pub fn postgres(pool: Arc<PgPool>) -> Self {
        Self {
            pets: Arc::new(PgPetRepository::new(pool.clone())),
            adoptions: Arc::new(PgAdoptionRepository::new(pool.clone())),
            users: Arc::new(PgUserRepository::new(pool.clone())),
            campaigns: Arc::new(PgCampaignRepository::new(pool.clone())),
            donators: Arc::new(PgDonatorRepository::new(pool)),
        }
    }
}

/// Token signing and payment settings the services are built with.
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub currency: String,
}

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub pet_service: Arc<PetService>,
    pub adoption_service: Arc<AdoptionService>,
    pub campaign_service: Arc<CampaignService>,
    pub donation_service: Arc<DonationService>,
}

impl AppState {
    /// Wires every service from the given repositories and payment gateway.
    pub fn new(
        repos: Repositories,
        gateway: Arc<dyn PaymentGateway>,
        settings: ServiceSettings,
    ) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(
                repos.users.clone(),
                &settings.jwt_secret,
                settings.token_ttl,
            )),
            user_service: Arc::new(UserService::new(repos.users.clone())),
            pet_service: Arc::new(PetService::new(repos.pets.clone())),
            adoption_service: Arc::new(AdoptionService::new(
                repos.adoptions.clone(),
                repos.pets.clone(),
            )),
            campaign_service: Arc::new(CampaignService::new(
                repos.campaigns.clone(),
                repos.donators.clone(),
            )),
            donation_service: Arc::new(DonationService::new(
                repos.users,
                repos.campaigns,
                repos.donators,
                gateway,
                settings.currency,
            )),
        }
    }
}
