//! PostgreSQL implementation of campaign repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Campaign, CampaignPatch, NewCampaign};
use crate::domain::object_id::ObjectId;
use crate::domain::repositories::{CampaignFilter, CampaignRepository, Page, PageRequest};
use crate::error::AppError;

const CAMPAIGN_COLUMNS: &str = "id, pet_name, picture, max_donation_amount, \
     last_date_of_donation, short_description, long_description, created_at, \
     donated_amount, paused, owner_email";

#[derive(sqlx::FromRow)]
struct CampaignRow {
    id: String,
    pet_name: String,
    picture: String,
    max_donation_amount: i64,
    last_date_of_donation: DateTime<Utc>,
    short_description: String,
    long_description: String,
    created_at: DateTime<Utc>,
    donated_amount: i64,
    paused: bool,
    owner_email: String,
}

impl From<CampaignRow> for Campaign {
    fn from(r: CampaignRow) -> Self {
        Campaign {
            id: ObjectId::from_db(r.id),
            pet_name: r.pet_name,
            picture: r.picture,
            max_donation_amount: r.max_donation_amount,
            last_date_of_donation: r.last_date_of_donation,
            short_description: r.short_description,
            long_description: r.long_description,
            created_at: r.created_at,
            donated_amount: r.donated_amount,
            paused: r.paused,
            owner_email: r.owner_email,
        }
    }
}

/// PostgreSQL repository for donation campaigns.
///
/// Pause toggling is a single `UPDATE ... SET paused = NOT paused`, so concurrent
/// toggles never lose an update.
pub struct PgCampaignRepository {
    pool: Arc<PgPool>,
}

impl PgCampaignRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CampaignRepository for PgCampaignRepository {
    async fn create(&self, new_campaign: NewCampaign) -> Result<Campaign, AppError> {
        let sql = format!(
            r#"
            INSERT INTO donation_campaigns (id, pet_name, picture, max_donation_amount,
                last_date_of_donation, short_description, long_description, owner_email)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {CAMPAIGN_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, CampaignRow>(&sql)
            .bind(ObjectId::generate().as_str())
            .bind(new_campaign.pet_name)
            .bind(new_campaign.picture)
            .bind(new_campaign.max_donation_amount)
            .bind(new_campaign.last_date_of_donation)
            .bind(new_campaign.short_description)
            .bind(new_campaign.long_description)
            .bind(new_campaign.owner_email)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Campaign>, AppError> {
        let sql = format!("SELECT {CAMPAIGN_COLUMNS} FROM donation_campaigns WHERE id = $1");

        let row = sqlx::query_as::<_, CampaignRow>(&sql)
            .bind(id.as_str())
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn list(
        &self,
        filter: &CampaignFilter,
        page: PageRequest,
    ) -> Result<Page<Campaign>, AppError> {
        let sql = format!(
            r#"
            SELECT {CAMPAIGN_COLUMNS} FROM donation_campaigns
            WHERE ($1::TEXT IS NULL OR owner_email = $1)
            ORDER BY created_at DESC, id DESC
            OFFSET $2 LIMIT $3
            "#
        );

        let rows = sqlx::query_as::<_, CampaignRow>(&sql)
            .bind(filter.owner_email.as_deref())
            .bind(page.skip)
            .bind(page.limit)
            .fetch_all(self.pool.as_ref())
            .await?;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM donation_campaigns WHERE ($1::TEXT IS NULL OR owner_email = $1)",
        )
        .bind(filter.owner_email.as_deref())
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(Page {
            items: rows.into_iter().map(Into::into).collect(),
            total,
        })
    }

    async fn update(
        &self,
        id: &ObjectId,
        patch: CampaignPatch,
    ) -> Result<Option<Campaign>, AppError> {
        let sql = format!(
            r#"
            UPDATE donation_campaigns SET
                pet_name              = COALESCE($2, pet_name),
                picture               = COALESCE($3, picture),
                max_donation_amount   = COALESCE($4, max_donation_amount),
                last_date_of_donation = COALESCE($5, last_date_of_donation),
                short_description     = COALESCE($6, short_description),
                long_description      = COALESCE($7, long_description),
                paused                = COALESCE($8, paused)
            WHERE id = $1
            RETURNING {CAMPAIGN_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, CampaignRow>(&sql)
            .bind(id.as_str())
            .bind(patch.pet_name)
            .bind(patch.picture)
            .bind(patch.max_donation_amount)
            .bind(patch.last_date_of_donation)
            .bind(patch.short_description)
            .bind(patch.long_description)
            .bind(patch.paused)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn toggle_paused(&self, id: &ObjectId) -> Result<Option<bool>, AppError> {
        let paused: Option<bool> = sqlx::query_scalar(
            "UPDATE donation_campaigns SET paused = NOT paused WHERE id = $1 RETURNING paused",
        )
        .bind(id.as_str())
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(paused)
    }

    async fn set_paused(&self, id: &ObjectId, paused: bool) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE donation_campaigns SET paused = $2 WHERE id = $1")
            .bind(id.as_str())
            .bind(paused)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM donation_campaigns WHERE id = $1")
            .bind(id.as_str())
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
