//! Donation flow: payment intent creation, donation records and refunds.

use chrono::Utc;
use metrics::counter;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::ObjectId;
use crate::domain::entities::{Donator, NewDonator, normalize_email};
use crate::domain::repositories::{CampaignRepository, DonatorRepository, UserRepository};
use crate::error::AppError;
use crate::infrastructure::payment::PaymentGateway;

/// Result of a successful donation.
#[derive(Debug, Clone)]
pub struct DonationReceipt {
    pub donator: Donator,
    /// Secret the client uses to confirm the payment intent.
    pub client_secret: Option<String>,
}

/// Service orchestrating donations.
///
/// A donation counts as successful once the provider has created a payment
/// intent; settlement is not awaited. Recording the donation and raising the
/// campaign total happen in one transaction after the intent exists.
pub struct DonationService {
    users: Arc<dyn UserRepository>,
    campaigns: Arc<dyn CampaignRepository>,
    donators: Arc<dyn DonatorRepository>,
    gateway: Arc<dyn PaymentGateway>,
    currency: String,
}

impl DonationService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        campaigns: Arc<dyn CampaignRepository>,
        donators: Arc<dyn DonatorRepository>,
        gateway: Arc<dyn PaymentGateway>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            users,
            campaigns,
            donators,
            gateway,
            currency: currency.into(),
        }
    }

    /// Currency every payment intent is created in.
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Donates `amount` minor units from the caller to a campaign.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the caller has no user record or the
    /// campaign does not exist. Nothing is charged or written in that case.
    /// Returns [`AppError::Validation`] if the amount is not positive, the campaign
    /// is paused or past its last donation date, or the amount exceeds what the
    /// campaign still accepts.
    /// Returns [`AppError::Internal`] if the payment provider fails or the donation
    /// cannot be recorded.
    pub async fn donate(
        &self,
        caller: &str,
        campaign_id: &ObjectId,
        amount: i64,
    ) -> Result<DonationReceipt, AppError> {
        if amount <= 0 {
            return Err(AppError::bad_request(
                "Amount must be positive",
                json!({ "amount": amount }),
            ));
        }

        let email = normalize_email(caller);
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "email": email })))?;

        let campaign = self
            .campaigns
            .find_by_id(campaign_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Campaign not found", json!({ "id": campaign_id }))
            })?;

        if campaign.paused {
            return Err(AppError::bad_request(
                "Campaign is paused",
                json!({ "id": campaign_id }),
            ));
        }
        if campaign.is_expired(Utc::now()) {
            return Err(AppError::bad_request(
                "Campaign no longer accepts donations",
                json!({ "id": campaign_id, "lastDateOfDonation": campaign.last_date_of_donation }),
            ));
        }
        if amount > campaign.remaining() {
            return Err(AppError::bad_request(
                "Amount exceeds the remaining campaign target",
                json!({ "amount": amount, "remaining": campaign.remaining() }),
            ));
        }

        let metadata = HashMap::from([
            ("campaign_id".to_string(), campaign_id.to_string()),
            ("donor_email".to_string(), user.email.clone()),
        ]);
        let intent = self
            .gateway
            .create_intent(amount, &self.currency, metadata)
            .await?;

        let recorded = self
            .donators
            .record_donation(NewDonator {
                user_id: user.id.clone(),
                email: user.email.clone(),
                campaign_id: campaign_id.clone(),
                amount,
                payment_intent_id: intent.id.clone(),
            })
            .await;

        let donator = match recorded {
            Ok(donator) => donator,
            Err(e) => {
                tracing::error!(
                    campaign_id = %campaign_id,
                    amount,
                    payment_intent_id = %intent.id,
                    error = %e,
                    "Payment intent created but donation was not recorded"
                );
                return Err(e);
            }
        };

        counter!("donations_recorded_total").increment(1);
        counter!("donation_amount_minor_total").increment(amount.unsigned_abs());
        tracing::info!(
            donator_id = %donator.id,
            campaign_id = %campaign_id,
            amount,
            payment_intent_id = %intent.id,
            "Donation recorded"
        );

        Ok(DonationReceipt {
            donator,
            client_secret: intent.client_secret,
        })
    }

    /// Lists the caller's own donations.
    pub async fn list_mine(&self, caller: &str) -> Result<Vec<Donator>, AppError> {
        self.donators.list_by_email(&normalize_email(caller)).await
    }

    /// Deletes one of the caller's donation records and lowers the campaign total.
    ///
    /// The payment itself is not reversed with the provider.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the record does not exist.
    /// Returns [`AppError::Forbidden`] if it belongs to someone else.
    pub async fn refund(&self, caller: &str, id: &ObjectId) -> Result<(), AppError> {
        let donator = self
            .donators
            .find_by_id(id)
            .await?
            .ok_or_else(|| donation_not_found(id))?;

        if !donator.is_owned_by(caller) {
            return Err(AppError::forbidden(
                "Donation belongs to another user",
                json!({ "id": id }),
            ));
        }

        let refunded = self
            .donators
            .refund(id)
            .await?
            .ok_or_else(|| donation_not_found(id))?;

        counter!("refunds_total").increment(1);
        tracing::info!(
            donator_id = %id,
            campaign_id = %refunded.campaign_id,
            amount = refunded.amount,
            payment_intent_id = %refunded.payment_intent_id,
            "Donation refunded"
        );
        Ok(())
    }
}

fn donation_not_found(id: &ObjectId) -> AppError {
    AppError::not_found("Donation not found", json!({ "id": id }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Campaign, Role, User};
    use crate::domain::repositories::{
        MockCampaignRepository, MockDonatorRepository, MockUserRepository,
    };
    use crate::infrastructure::payment::{MockPaymentGateway, PaymentError, PaymentIntent};
    use chrono::Duration;

    fn user() -> User {
        User {
            id: ObjectId::generate(),
            email: "donor@example.com".to_string(),
            name: "Dee".to_string(),
            photo: None,
            role: Role::User,
            banned: false,
            created_at: Utc::now(),
        }
    }

    fn campaign(donated: i64, paused: bool) -> Campaign {
        let now = Utc::now();
        Campaign {
            id: ObjectId::generate(),
            pet_name: "Milo".to_string(),
            picture: "https://img.example.com/milo.png".to_string(),
            max_donation_amount: 10_000,
            last_date_of_donation: now + Duration::days(7),
            short_description: "Surgery".to_string(),
            long_description: "Milo needs surgery".to_string(),
            created_at: now,
            donated_amount: donated,
            paused,
            owner_email: "owner@example.com".to_string(),
        }
    }

    fn intent() -> PaymentIntent {
        PaymentIntent {
            id: "pi_123".to_string(),
            client_secret: Some("pi_123_secret".to_string()),
            status: "requires_payment_method".to_string(),
        }
    }

    fn donator_from(new: NewDonator) -> Donator {
        Donator {
            id: ObjectId::generate(),
            user_id: new.user_id,
            email: new.email,
            campaign_id: new.campaign_id,
            amount: new.amount,
            payment_intent_id: new.payment_intent_id,
            date: Utc::now(),
        }
    }

    struct Mocks {
        users: MockUserRepository,
        campaigns: MockCampaignRepository,
        donators: MockDonatorRepository,
        gateway: MockPaymentGateway,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                users: MockUserRepository::new(),
                campaigns: MockCampaignRepository::new(),
                donators: MockDonatorRepository::new(),
                gateway: MockPaymentGateway::new(),
            }
        }

        fn into_service(self) -> DonationService {
            DonationService::new(
                Arc::new(self.users),
                Arc::new(self.campaigns),
                Arc::new(self.donators),
                Arc::new(self.gateway),
                "usd",
            )
        }
    }

    #[tokio::test]
    async fn test_donate_records_intent() {
        let mut m = Mocks::new();
        m.users.expect_find_by_email().returning(|_| Ok(Some(user())));
        m.campaigns
            .expect_find_by_id()
            .returning(|_| Ok(Some(campaign(0, false))));
        m.gateway
            .expect_create_intent()
            .withf(|amount, currency, metadata| {
                *amount == 1250 && currency.to_string() == "usd" && metadata.contains_key("campaign_id")
            })
            .times(1)
            .returning(|_, _, _| Ok(intent()));
        m.donators
            .expect_record_donation()
            .withf(|d| d.amount == 1250 && d.payment_intent_id == "pi_123")
            .times(1)
            .returning(|d| Ok(donator_from(d)));

        let receipt = m
            .into_service()
            .donate("Donor@Example.com", &ObjectId::generate(), 1250)
            .await
            .unwrap();

        assert_eq!(receipt.donator.amount, 1250);
        assert_eq!(receipt.donator.email, "donor@example.com");
        assert_eq!(receipt.client_secret.as_deref(), Some("pi_123_secret"));
    }

    #[tokio::test]
    async fn test_donate_missing_campaign_has_no_side_effects() {
        let mut m = Mocks::new();
        m.users.expect_find_by_email().returning(|_| Ok(Some(user())));
        m.campaigns.expect_find_by_id().returning(|_| Ok(None));
        m.gateway.expect_create_intent().never();
        m.donators.expect_record_donation().never();

        let result = m
            .into_service()
            .donate("donor@example.com", &ObjectId::generate(), 1250)
            .await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_donate_unknown_user() {
        let mut m = Mocks::new();
        m.users.expect_find_by_email().returning(|_| Ok(None));
        m.campaigns.expect_find_by_id().never();

        let result = m
            .into_service()
            .donate("ghost@example.com", &ObjectId::generate(), 100)
            .await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_donate_paused_campaign() {
        let mut m = Mocks::new();
        m.users.expect_find_by_email().returning(|_| Ok(Some(user())));
        m.campaigns
            .expect_find_by_id()
            .returning(|_| Ok(Some(campaign(0, true))));
        m.gateway.expect_create_intent().never();

        let result = m
            .into_service()
            .donate("donor@example.com", &ObjectId::generate(), 100)
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_donate_over_remaining_cap() {
        let mut m = Mocks::new();
        m.users.expect_find_by_email().returning(|_| Ok(Some(user())));
        m.campaigns
            .expect_find_by_id()
            .returning(|_| Ok(Some(campaign(9_500, false))));
        m.gateway.expect_create_intent().never();

        let result = m
            .into_service()
            .donate("donor@example.com", &ObjectId::generate(), 600)
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_donate_provider_failure_records_nothing() {
        let mut m = Mocks::new();
        m.users.expect_find_by_email().returning(|_| Ok(Some(user())));
        m.campaigns
            .expect_find_by_id()
            .returning(|_| Ok(Some(campaign(0, false))));
        m.gateway.expect_create_intent().returning(|_, _, _| {
            Err(PaymentError::Rejected {
                status: 402,
                message: "card_declined".to_string(),
            })
        });
        m.donators.expect_record_donation().never();

        let result = m
            .into_service()
            .donate("donor@example.com", &ObjectId::generate(), 100)
            .await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_donate_cap_taken_by_concurrent_donation() {
        let mut m = Mocks::new();
        m.users.expect_find_by_email().returning(|_| Ok(Some(user())));
        // Read before another donor filled the campaign.
        m.campaigns
            .expect_find_by_id()
            .returning(|_| Ok(Some(campaign(0, false))));
        m.gateway
            .expect_create_intent()
            .times(1)
            .returning(|_, _, _| Ok(intent()));
        m.donators.expect_record_donation().times(1).returning(|d| {
            Err(AppError::bad_request(
                "Amount exceeds the remaining campaign target",
                json!({ "amount": d.amount, "remaining": 0 }),
            ))
        });

        let result = m
            .into_service()
            .donate("donor@example.com", &ObjectId::generate(), 8_000)
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_refund_forbidden_for_other_donor() {
        let mut m = Mocks::new();
        m.donators.expect_find_by_id().returning(|_| {
            Ok(Some(Donator {
                id: ObjectId::generate(),
                user_id: ObjectId::generate(),
                email: "someone@example.com".to_string(),
                campaign_id: ObjectId::generate(),
                amount: 500,
                payment_intent_id: "pi_9".to_string(),
                date: Utc::now(),
            }))
        });
        m.donators.expect_refund().never();

        let result = m
            .into_service()
            .refund("donor@example.com", &ObjectId::generate())
            .await;

        assert!(matches!(result, Err(AppError::Forbidden { .. })));
    }

    #[tokio::test]
    async fn test_refund_missing_record() {
        let mut m = Mocks::new();
        m.donators.expect_find_by_id().returning(|_| Ok(None));

        let result = m
            .into_service()
            .refund("donor@example.com", &ObjectId::generate())
            .await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }
}
