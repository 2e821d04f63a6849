//! PostgreSQL implementation of donation record repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Donator, NewDonator};
use crate::domain::object_id::ObjectId;
use crate::domain::repositories::DonatorRepository;
use crate::error::AppError;

const DONATOR_COLUMNS: &str =
    "id, user_id, email, donation_campaign_id, amount, payment_intent_id, date";

#[derive(sqlx::FromRow)]
struct DonatorRow {
    id: String,
    user_id: String,
    email: String,
    donation_campaign_id: String,
    amount: i64,
    payment_intent_id: String,
    date: DateTime<Utc>,
}

impl From<DonatorRow> for Donator {
    fn from(r: DonatorRow) -> Self {
        Donator {
            id: ObjectId::from_db(r.id),
            user_id: ObjectId::from_db(r.user_id),
            email: r.email,
            campaign_id: ObjectId::from_db(r.donation_campaign_id),
            amount: r.amount,
            payment_intent_id: r.payment_intent_id,
            date: r.date,
        }
    }
}

/// PostgreSQL repository for donation records.
///
/// Record inserts and deletes run in the same transaction as the matching
/// `donated_amount` change on `donation_campaigns`.
pub struct PgDonatorRepository {
    pool: Arc<PgPool>,
}

impl PgDonatorRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DonatorRepository for PgDonatorRepository {
    async fn record_donation(&self, donation: NewDonator) -> Result<Donator, AppError> {
        let mut tx = self.pool.begin().await?;

        // The cap and pause checks live in the UPDATE itself; a concurrent donation
        // re-evaluates them against the committed total.
        let result = sqlx::query(
            r#"
            UPDATE donation_campaigns
            SET donated_amount = donated_amount + $2
            WHERE id = $1
              AND NOT paused
              AND donated_amount + $2 <= max_donation_amount
            "#,
        )
        .bind(donation.campaign_id.as_str())
        .bind(donation.amount)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            let current = sqlx::query_as::<_, (bool, i64)>(
                "SELECT paused, max_donation_amount - donated_amount FROM donation_campaigns WHERE id = $1",
            )
            .bind(donation.campaign_id.as_str())
            .fetch_optional(&mut *tx)
            .await?;
            tx.rollback().await?;

            return Err(match current {
                None => AppError::not_found(
                    "Donation campaign not found",
                    json!({ "id": donation.campaign_id }),
                ),
                Some((true, _)) => AppError::bad_request(
                    "Campaign is paused",
                    json!({ "id": donation.campaign_id }),
                ),
                Some((false, remaining)) => AppError::bad_request(
                    "Amount exceeds the remaining campaign target",
                    json!({ "amount": donation.amount, "remaining": remaining.max(0) }),
                ),
            });
        }

        let sql = format!(
            r#"
            INSERT INTO donators (id, user_id, email, donation_campaign_id, amount, payment_intent_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {DONATOR_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, DonatorRow>(&sql)
            .bind(ObjectId::generate().as_str())
            .bind(donation.user_id.as_str())
            .bind(&donation.email)
            .bind(donation.campaign_id.as_str())
            .bind(donation.amount)
            .bind(&donation.payment_intent_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(row.into())
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Donator>, AppError> {
        let sql = format!("SELECT {DONATOR_COLUMNS} FROM donators WHERE id = $1");

        let row = sqlx::query_as::<_, DonatorRow>(&sql)
            .bind(id.as_str())
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn list_by_campaign(&self, campaign_id: &ObjectId) -> Result<Vec<Donator>, AppError> {
        let sql = format!(
            "SELECT {DONATOR_COLUMNS} FROM donators WHERE donation_campaign_id = $1 ORDER BY date DESC, id DESC"
        );

        let rows = sqlx::query_as::<_, DonatorRow>(&sql)
            .bind(campaign_id.as_str())
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_by_email(&self, email: &str) -> Result<Vec<Donator>, AppError> {
        let sql = format!(
            "SELECT {DONATOR_COLUMNS} FROM donators WHERE email = $1 ORDER BY date DESC, id DESC"
        );

        let rows = sqlx::query_as::<_, DonatorRow>(&sql)
            .bind(email)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn refund(&self, id: &ObjectId) -> Result<Option<Donator>, AppError> {
        let mut tx = self.pool.begin().await?;

        let sql = format!("DELETE FROM donators WHERE id = $1 RETURNING {DONATOR_COLUMNS}");
        let deleted = sqlx::query_as::<_, DonatorRow>(&sql)
            .bind(id.as_str())
            .fetch_optional(&mut *tx)
            .await?;

        let Some(row) = deleted else {
            tx.rollback().await?;
            return Ok(None);
        };

        sqlx::query(
            "UPDATE donation_campaigns SET donated_amount = donated_amount - $2 WHERE id = $1",
        )
        .bind(&row.donation_campaign_id)
        .bind(row.amount)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(row.into()))
    }
}
