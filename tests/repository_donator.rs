//! PostgreSQL repository tests. Run with `DATABASE_URL` set:
//! `cargo test -- --ignored`.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use pet_adoption::domain::ObjectId;
use pet_adoption::domain::entities::{NewCampaign, NewDonator, NewUser, User};
use pet_adoption::domain::repositories::{CampaignRepository, DonatorRepository, UserRepository};
use pet_adoption::error::AppError;
use pet_adoption::infrastructure::persistence::{
    PgCampaignRepository, PgDonatorRepository, PgUserRepository,
};

async fn seed_user(pool: &Arc<PgPool>) -> User {
    let (user, _) = PgUserRepository::new(pool.clone())
        .insert_if_absent(NewUser {
            email: "donor@example.com".to_string(),
            name: "Donor".to_string(),
            photo: None,
        })
        .await
        .unwrap();
    user
}

async fn seed_campaign(pool: &Arc<PgPool>, max_donation_amount: i64) -> ObjectId {
    PgCampaignRepository::new(pool.clone())
        .create(NewCampaign {
            pet_name: "Milo".to_string(),
            picture: "https://img.example.com/milo.png".to_string(),
            max_donation_amount,
            last_date_of_donation: Utc::now() + Duration::days(7),
            short_description: "Surgery".to_string(),
            long_description: "Milo needs surgery".to_string(),
            owner_email: "owner@example.com".to_string(),
        })
        .await
        .unwrap()
        .id
}

fn donation(user: &User, campaign_id: &ObjectId, amount: i64) -> NewDonator {
    NewDonator {
        user_id: user.id.clone(),
        email: user.email.clone(),
        campaign_id: campaign_id.clone(),
        amount,
        payment_intent_id: format!("pi_{amount}"),
    }
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_record_and_refund_keep_total(pool: PgPool) {
    let pool = Arc::new(pool);
    let user = seed_user(&pool).await;
    let campaign_id = seed_campaign(&pool, 10_000).await;
    let campaigns = PgCampaignRepository::new(pool.clone());
    let donators = PgDonatorRepository::new(pool.clone());

    let first = donators
        .record_donation(donation(&user, &campaign_id, 1250))
        .await
        .unwrap();
    donators
        .record_donation(donation(&user, &campaign_id, 500))
        .await
        .unwrap();

    let campaign = campaigns.find_by_id(&campaign_id).await.unwrap().unwrap();
    assert_eq!(campaign.donated_amount, 1750);

    let refunded = donators.refund(&first.id).await.unwrap().unwrap();
    assert_eq!(refunded.amount, 1250);

    let campaign = campaigns.find_by_id(&campaign_id).await.unwrap().unwrap();
    assert_eq!(campaign.donated_amount, 500);
    assert!(donators.find_by_id(&first.id).await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_record_donation_missing_campaign_writes_nothing(pool: PgPool) {
    let pool = Arc::new(pool);
    let user = seed_user(&pool).await;
    let donators = PgDonatorRepository::new(pool.clone());

    let result = donators
        .record_donation(donation(&user, &ObjectId::generate(), 100))
        .await;

    assert!(result.is_err());
    assert!(
        donators
            .list_by_email("donor@example.com")
            .await
            .unwrap()
            .is_empty()
    );
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_refund_unknown_donation(pool: PgPool) {
    let donators = PgDonatorRepository::new(Arc::new(pool));

    let result = donators.refund(&ObjectId::generate()).await.unwrap();

    assert!(result.is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_concurrent_donations_respect_cap(pool: PgPool) {
    let pool = Arc::new(pool);
    let user = seed_user(&pool).await;
    let campaign_id = seed_campaign(&pool, 1_000).await;
    let first = PgDonatorRepository::new(pool.clone());
    let second = PgDonatorRepository::new(pool.clone());

    let (a, b) = tokio::join!(
        first.record_donation(donation(&user, &campaign_id, 800)),
        second.record_donation(donation(&user, &campaign_id, 700)),
    );

    assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
    let rejected = a.err().or(b.err()).unwrap();
    assert!(matches!(rejected, AppError::Validation { .. }));

    let campaign = PgCampaignRepository::new(pool.clone())
        .find_by_id(&campaign_id)
        .await
        .unwrap()
        .unwrap();
    assert!(campaign.donated_amount <= 1_000);
    assert_eq!(
        first.list_by_campaign(&campaign_id).await.unwrap().len(),
        1
    );
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_record_donation_rejects_paused_and_over_cap(pool: PgPool) {
    let pool = Arc::new(pool);
    let user = seed_user(&pool).await;
    let campaign_id = seed_campaign(&pool, 1_000).await;
    let campaigns = PgCampaignRepository::new(pool.clone());
    let donators = PgDonatorRepository::new(pool.clone());

    let over = donators
        .record_donation(donation(&user, &campaign_id, 1_001))
        .await;
    assert!(matches!(over, Err(AppError::Validation { .. })));

    assert!(campaigns.set_paused(&campaign_id, true).await.unwrap());
    let paused = donators
        .record_donation(donation(&user, &campaign_id, 100))
        .await;
    assert!(matches!(paused, Err(AppError::Validation { .. })));

    let campaign = campaigns.find_by_id(&campaign_id).await.unwrap().unwrap();
    assert_eq!(campaign.donated_amount, 0);
    assert!(donators.list_by_campaign(&campaign_id).await.unwrap().is_empty());
}
