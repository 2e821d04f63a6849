//! In-memory storage and payment fakes for handler tests.
//!
//! One store backs every repository trait so cross-collection operations stay
//! consistent, as they do in a single database transaction.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use pet_adoption::domain::ObjectId;
use pet_adoption::domain::entities::{
    AdoptionRequest, AdoptionStatus, Campaign, CampaignPatch, Donator, NewAdoptionRequest,
    NewCampaign, NewDonator, NewPet, NewUser, Pet, PetFilter, PetPatch, Role, User,
};
use pet_adoption::domain::repositories::{
    AdoptionRepository, CampaignFilter, CampaignRepository, DonatorRepository, Page, PageRequest,
    PetRepository, UserRepository,
};
use pet_adoption::error::AppError;
use pet_adoption::infrastructure::payment::{PaymentError, PaymentGateway, PaymentIntent};

#[derive(Default)]
struct Data {
    pets: Vec<Pet>,
    adoptions: Vec<AdoptionRequest>,
    users: Vec<User>,
    campaigns: Vec<Campaign>,
    donators: Vec<Donator>,
}

/// Records are appended in insertion order; listings walk them in reverse to
/// return newest first.
#[derive(Default)]
pub struct InMemoryStore {
    data: Mutex<Data>,
}

fn window<T: Clone>(items: Vec<T>, page: PageRequest) -> Page<T> {
    let total = items.len() as i64;
    let items = items
        .into_iter()
        .skip(usize::try_from(page.skip).unwrap_or(0))
        .take(usize::try_from(page.limit).unwrap_or(usize::MAX))
        .collect();
    Page { items, total }
}

impl InMemoryStore {
    pub fn make_admin(&self, email: &str) {
        let mut data = self.data.lock().unwrap();
        if let Some(user) = data.users.iter_mut().find(|u| u.email == email) {
            user.role = Role::Admin;
        }
    }

    pub fn ban(&self, email: &str) {
        let mut data = self.data.lock().unwrap();
        if let Some(user) = data.users.iter_mut().find(|u| u.email == email) {
            user.banned = true;
        }
    }

    pub fn user(&self, email: &str) -> Option<User> {
        let data = self.data.lock().unwrap();
        data.users.iter().find(|u| u.email == email).cloned()
    }

    pub fn pet(&self, id: &str) -> Option<Pet> {
        let data = self.data.lock().unwrap();
        data.pets.iter().find(|p| p.id.as_str() == id).cloned()
    }

    pub fn campaign(&self, id: &str) -> Option<Campaign> {
        let data = self.data.lock().unwrap();
        data.campaigns.iter().find(|c| c.id.as_str() == id).cloned()
    }

    pub fn donator_count(&self) -> usize {
        self.data.lock().unwrap().donators.len()
    }
}

#[async_trait]
impl PetRepository for InMemoryStore {
    async fn create(&self, new_pet: NewPet) -> Result<Pet, AppError> {
        let pet = Pet {
            id: ObjectId::generate(),
            image: new_pet.image,
            name: new_pet.name,
            age: new_pet.age,
            category: new_pet.category,
            location: new_pet.location,
            short_description: new_pet.short_description,
            long_description: new_pet.long_description,
            date_added: Utc::now(),
            adopted: false,
            owner_email: new_pet.owner_email,
        };
        self.data.lock().unwrap().pets.push(pet.clone());
        Ok(pet)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Pet>, AppError> {
        let data = self.data.lock().unwrap();
        Ok(data.pets.iter().find(|p| &p.id == id).cloned())
    }

    async fn list(&self, filter: &PetFilter, page: PageRequest) -> Result<Page<Pet>, AppError> {
        let data = self.data.lock().unwrap();
        let search = filter.search.as_ref().map(|s| s.to_lowercase());
        let matches = data
            .pets
            .iter()
            .rev()
            .filter(|p| filter.category.as_ref().is_none_or(|c| &p.category == c))
            .filter(|p| {
                search
                    .as_ref()
                    .is_none_or(|s| p.name.to_lowercase().contains(s))
            })
            .filter(|p| filter.adopted.is_none_or(|a| p.adopted == a))
            .filter(|p| {
                filter
                    .owner_email
                    .as_ref()
                    .is_none_or(|o| &p.owner_email == o)
            })
            .cloned()
            .collect();
        Ok(window(matches, page))
    }

    async fn update(&self, id: &ObjectId, patch: PetPatch) -> Result<Option<Pet>, AppError> {
        let mut data = self.data.lock().unwrap();
        let Some(pet) = data.pets.iter_mut().find(|p| &p.id == id) else {
            return Ok(None);
        };
        if let Some(v) = patch.image {
            pet.image = v;
        }
        if let Some(v) = patch.name {
            pet.name = v;
        }
        if let Some(v) = patch.age {
            pet.age = v;
        }
        if let Some(v) = patch.category {
            pet.category = v;
        }
        if let Some(v) = patch.location {
            pet.location = v;
        }
        if let Some(v) = patch.short_description {
            pet.short_description = v;
        }
        if let Some(v) = patch.long_description {
            pet.long_description = v;
        }
        if let Some(v) = patch.adopted {
            pet.adopted = v;
        }
        Ok(Some(pet.clone()))
    }

    async fn set_adopted(&self, id: &ObjectId, adopted: bool) -> Result<bool, AppError> {
        let mut data = self.data.lock().unwrap();
        match data.pets.iter_mut().find(|p| &p.id == id) {
            Some(pet) => {
                pet.adopted = adopted;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let mut data = self.data.lock().unwrap();
        let before = data.pets.len();
        data.pets.retain(|p| &p.id != id);
        Ok(data.pets.len() != before)
    }
}

#[async_trait]
impl AdoptionRepository for InMemoryStore {
    async fn create(&self, request: NewAdoptionRequest) -> Result<AdoptionRequest, AppError> {
        let request = AdoptionRequest {
            id: ObjectId::generate(),
            pet_id: request.pet_id,
            requester_email: request.requester_email,
            requester_name: request.requester_name,
            phone: request.phone,
            address: request.address,
            status: AdoptionStatus::Pending,
            created_at: Utc::now(),
        };
        self.data.lock().unwrap().adoptions.push(request.clone());
        Ok(request)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<AdoptionRequest>, AppError> {
        let data = self.data.lock().unwrap();
        Ok(data.adoptions.iter().find(|r| &r.id == id).cloned())
    }

    async fn find_pending(
        &self,
        pet_id: &ObjectId,
        requester_email: &str,
    ) -> Result<Option<AdoptionRequest>, AppError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .adoptions
            .iter()
            .find(|r| {
                &r.pet_id == pet_id
                    && r.requester_email == requester_email
                    && r.status == AdoptionStatus::Pending
            })
            .cloned())
    }

    async fn list_for_pets(&self, pet_ids: &[ObjectId]) -> Result<Vec<AdoptionRequest>, AppError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .adoptions
            .iter()
            .rev()
            .filter(|r| pet_ids.contains(&r.pet_id))
            .cloned()
            .collect())
    }

    async fn resolve(
        &self,
        id: &ObjectId,
        status: AdoptionStatus,
        pet_adopted: bool,
    ) -> Result<(), AppError> {
        let mut data = self.data.lock().unwrap();
        let Some(request) = data.adoptions.iter_mut().find(|r| &r.id == id) else {
            return Err(AppError::not_found(
                "Adoption request not found",
                json!({ "id": id }),
            ));
        };
        if request.status != AdoptionStatus::Pending {
            return Err(AppError::conflict(
                "Adoption request is already resolved",
                json!({ "id": id, "status": request.status.as_str() }),
            ));
        }
        request.status = status;
        let pet_id = request.pet_id.clone();

        if let Some(pet) = data.pets.iter_mut().find(|p| p.id == pet_id) {
            pet.adopted = pet_adopted;
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert_if_absent(&self, new_user: NewUser) -> Result<(User, bool), AppError> {
        let mut data = self.data.lock().unwrap();
        if let Some(existing) = data.users.iter().find(|u| u.email == new_user.email) {
            return Ok((existing.clone(), false));
        }
        let user = User {
            id: ObjectId::generate(),
            email: new_user.email,
            name: new_user.name,
            photo: new_user.photo,
            role: Role::User,
            banned: false,
            created_at: Utc::now(),
        };
        data.users.push(user.clone());
        Ok((user, true))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let data = self.data.lock().unwrap();
        Ok(data.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, AppError> {
        let data = self.data.lock().unwrap();
        Ok(data.users.iter().find(|u| &u.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let data = self.data.lock().unwrap();
        Ok(data.users.iter().rev().cloned().collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.data.lock().unwrap().users.len() as i64)
    }

    async fn set_role(&self, id: &ObjectId, role: Role) -> Result<bool, AppError> {
        let mut data = self.data.lock().unwrap();
        match data.users.iter_mut().find(|u| &u.id == id) {
            Some(user) => {
                user.role = role;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_banned(&self, id: &ObjectId, banned: bool) -> Result<bool, AppError> {
        let mut data = self.data.lock().unwrap();
        match data.users.iter_mut().find(|u| &u.id == id) {
            Some(user) => {
                user.banned = banned;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let mut data = self.data.lock().unwrap();
        let before = data.users.len();
        data.users.retain(|u| &u.id != id);
        Ok(data.users.len() != before)
    }
}

#[async_trait]
impl CampaignRepository for InMemoryStore {
    async fn create(&self, new_campaign: NewCampaign) -> Result<Campaign, AppError> {
        let campaign = Campaign {
            id: ObjectId::generate(),
            pet_name: new_campaign.pet_name,
            picture: new_campaign.picture,
            max_donation_amount: new_campaign.max_donation_amount,
            last_date_of_donation: new_campaign.last_date_of_donation,
            short_description: new_campaign.short_description,
            long_description: new_campaign.long_description,
            created_at: Utc::now(),
            donated_amount: 0,
            paused: false,
            owner_email: new_campaign.owner_email,
        };
        self.data.lock().unwrap().campaigns.push(campaign.clone());
        Ok(campaign)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Campaign>, AppError> {
        let data = self.data.lock().unwrap();
        Ok(data.campaigns.iter().find(|c| &c.id == id).cloned())
    }

    async fn list(
        &self,
        filter: &CampaignFilter,
        page: PageRequest,
    ) -> Result<Page<Campaign>, AppError> {
        let data = self.data.lock().unwrap();
        let matches = data
            .campaigns
            .iter()
            .rev()
            .filter(|c| {
                filter
                    .owner_email
                    .as_ref()
                    .is_none_or(|o| &c.owner_email == o)
            })
            .cloned()
            .collect();
        Ok(window(matches, page))
    }

    async fn update(
        &self,
        id: &ObjectId,
        patch: CampaignPatch,
    ) -> Result<Option<Campaign>, AppError> {
        let mut data = self.data.lock().unwrap();
        let Some(campaign) = data.campaigns.iter_mut().find(|c| &c.id == id) else {
            return Ok(None);
        };
        if let Some(v) = patch.pet_name {
            campaign.pet_name = v;
        }
        if let Some(v) = patch.picture {
            campaign.picture = v;
        }
        if let Some(v) = patch.max_donation_amount {
            campaign.max_donation_amount = v;
        }
        if let Some(v) = patch.last_date_of_donation {
            campaign.last_date_of_donation = v;
        }
        if let Some(v) = patch.short_description {
            campaign.short_description = v;
        }
        if let Some(v) = patch.long_description {
            campaign.long_description = v;
        }
        if let Some(v) = patch.paused {
            campaign.paused = v;
        }
        Ok(Some(campaign.clone()))
    }

    async fn toggle_paused(&self, id: &ObjectId) -> Result<Option<bool>, AppError> {
        let mut data = self.data.lock().unwrap();
        Ok(data.campaigns.iter_mut().find(|c| &c.id == id).map(|c| {
            c.paused = !c.paused;
            c.paused
        }))
    }

    async fn set_paused(&self, id: &ObjectId, paused: bool) -> Result<bool, AppError> {
        let mut data = self.data.lock().unwrap();
        match data.campaigns.iter_mut().find(|c| &c.id == id) {
            Some(campaign) => {
                campaign.paused = paused;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let mut data = self.data.lock().unwrap();
        let before = data.campaigns.len();
        data.campaigns.retain(|c| &c.id != id);
        Ok(data.campaigns.len() != before)
    }
}

#[async_trait]
impl DonatorRepository for InMemoryStore {
    async fn record_donation(&self, donation: NewDonator) -> Result<Donator, AppError> {
        let mut data = self.data.lock().unwrap();
        let Some(campaign) = data
            .campaigns
            .iter_mut()
            .find(|c| c.id == donation.campaign_id)
        else {
            return Err(AppError::not_found(
                "Campaign not found",
                json!({ "id": donation.campaign_id }),
            ));
        };
        if campaign.paused {
            return Err(AppError::bad_request(
                "Campaign is paused",
                json!({ "id": donation.campaign_id }),
            ));
        }
        if campaign.donated_amount + donation.amount > campaign.max_donation_amount {
            return Err(AppError::bad_request(
                "Amount exceeds the remaining campaign target",
                json!({ "amount": donation.amount, "remaining": campaign.remaining() }),
            ));
        }
        campaign.donated_amount += donation.amount;

        let donator = Donator {
            id: ObjectId::generate(),
            user_id: donation.user_id,
            email: donation.email,
            campaign_id: donation.campaign_id,
            amount: donation.amount,
            payment_intent_id: donation.payment_intent_id,
            date: Utc::now(),
        };
        data.donators.push(donator.clone());
        Ok(donator)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Donator>, AppError> {
        let data = self.data.lock().unwrap();
        Ok(data.donators.iter().find(|d| &d.id == id).cloned())
    }

    async fn list_by_campaign(&self, campaign_id: &ObjectId) -> Result<Vec<Donator>, AppError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .donators
            .iter()
            .rev()
            .filter(|d| &d.campaign_id == campaign_id)
            .cloned()
            .collect())
    }

    async fn list_by_email(&self, email: &str) -> Result<Vec<Donator>, AppError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .donators
            .iter()
            .rev()
            .filter(|d| d.email == email)
            .cloned()
            .collect())
    }

    async fn refund(&self, id: &ObjectId) -> Result<Option<Donator>, AppError> {
        let mut data = self.data.lock().unwrap();
        let Some(pos) = data.donators.iter().position(|d| &d.id == id) else {
            return Ok(None);
        };
        let donator = data.donators.remove(pos);
        if let Some(campaign) = data
            .campaigns
            .iter_mut()
            .find(|c| c.id == donator.campaign_id)
        {
            campaign.donated_amount -= donator.amount;
        }
        Ok(Some(donator))
    }
}

/// Payment gateway that hands out sequential intent ids.
#[derive(Default)]
pub struct FakePaymentGateway {
    created: AtomicUsize,
    failing: AtomicBool,
    currencies: Mutex<Vec<String>>,
}

impl FakePaymentGateway {
    pub fn intents_created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub fn fail_next_calls(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn currencies(&self) -> Vec<String> {
        self.currencies.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentGateway for FakePaymentGateway {
    async fn create_intent(
        &self,
        _amount: i64,
        currency: &str,
        _metadata: HashMap<String, String>,
    ) -> Result<PaymentIntent, PaymentError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(PaymentError::Rejected {
                status: 402,
                message: "card_declined".to_string(),
            });
        }

        let n = self.created.fetch_add(1, Ordering::SeqCst) + 1;
        self.currencies.lock().unwrap().push(currency.to_string());
        Ok(PaymentIntent {
            id: format!("pi_test_{n}"),
            client_secret: Some(format!("pi_test_{n}_secret")),
            status: "requires_payment_method".to_string(),
        })
    }
}
