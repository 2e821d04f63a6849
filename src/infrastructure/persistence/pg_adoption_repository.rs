//! PostgreSQL implementation of adoption request repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{AdoptionRequest, AdoptionStatus, NewAdoptionRequest};
use crate::domain::object_id::ObjectId;
use crate::domain::repositories::AdoptionRepository;
use crate::error::AppError;

const ADOPTION_COLUMNS: &str =
    "id, pet_id, requester_email, requester_name, phone, address, status, created_at";

#[derive(sqlx::FromRow)]
struct AdoptionRow {
    id: String,
    pet_id: String,
    requester_email: String,
    requester_name: String,
    phone: String,
    address: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AdoptionRow> for AdoptionRequest {
    type Error = AppError;

    fn try_from(r: AdoptionRow) -> Result<Self, Self::Error> {
        let status = r.status.parse::<AdoptionStatus>().map_err(|e| {
            AppError::internal("Corrupt adoption request", json!({ "id": r.id, "reason": e }))
        })?;

        Ok(AdoptionRequest {
            id: ObjectId::from_db(r.id),
            pet_id: ObjectId::from_db(r.pet_id),
            requester_email: r.requester_email,
            requester_name: r.requester_name,
            phone: r.phone,
            address: r.address,
            status,
            created_at: r.created_at,
        })
    }
}

/// PostgreSQL repository for adoption requests.
///
/// Resolution updates the request and its pet in one transaction.
pub struct PgAdoptionRepository {
    pool: Arc<PgPool>,
}

impl PgAdoptionRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdoptionRepository for PgAdoptionRepository {
    async fn create(&self, request: NewAdoptionRequest) -> Result<AdoptionRequest, AppError> {
        let sql = format!(
            r#"
            INSERT INTO adoption_requests (id, pet_id, requester_email, requester_name, phone, address, status)
            VALUES ($1, $2, $3, $4, $5, $6, 'pending')
            RETURNING {ADOPTION_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, AdoptionRow>(&sql)
            .bind(ObjectId::generate().as_str())
            .bind(request.pet_id.as_str())
            .bind(request.requester_email)
            .bind(request.requester_name)
            .bind(request.phone)
            .bind(request.address)
            .fetch_one(self.pool.as_ref())
            .await?;

        row.try_into()
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<AdoptionRequest>, AppError> {
        let sql = format!("SELECT {ADOPTION_COLUMNS} FROM adoption_requests WHERE id = $1");

        let row = sqlx::query_as::<_, AdoptionRow>(&sql)
            .bind(id.as_str())
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn find_pending(
        &self,
        pet_id: &ObjectId,
        requester_email: &str,
    ) -> Result<Option<AdoptionRequest>, AppError> {
        let sql = format!(
            r#"
            SELECT {ADOPTION_COLUMNS} FROM adoption_requests
            WHERE pet_id = $1 AND requester_email = $2 AND status = 'pending'
            LIMIT 1
            "#
        );

        let row = sqlx::query_as::<_, AdoptionRow>(&sql)
            .bind(pet_id.as_str())
            .bind(requester_email)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn list_for_pets(&self, pet_ids: &[ObjectId]) -> Result<Vec<AdoptionRequest>, AppError> {
        if pet_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = pet_ids.iter().map(|id| id.as_str().to_string()).collect();
        let sql = format!(
            r#"
            SELECT {ADOPTION_COLUMNS} FROM adoption_requests
            WHERE pet_id = ANY($1)
            ORDER BY created_at DESC, id DESC
            "#
        );

        let rows = sqlx::query_as::<_, AdoptionRow>(&sql)
            .bind(ids)
            .fetch_all(self.pool.as_ref())
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn resolve(
        &self,
        id: &ObjectId,
        status: AdoptionStatus,
        pet_adopted: bool,
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let pet_id: Option<String> = sqlx::query_scalar(
            "UPDATE adoption_requests SET status = $2 WHERE id = $1 AND status = 'pending' RETURNING pet_id",
        )
        .bind(id.as_str())
        .bind(status.as_str())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(pet_id) = pet_id else {
            let current: Option<String> =
                sqlx::query_scalar("SELECT status FROM adoption_requests WHERE id = $1")
                    .bind(id.as_str())
                    .fetch_optional(&mut *tx)
                    .await?;
            tx.rollback().await?;

            return Err(match current {
                None => AppError::not_found("Adoption request not found", json!({ "id": id })),
                Some(current) => AppError::conflict(
                    "Adoption request is already resolved",
                    json!({ "id": id, "status": current }),
                ),
            });
        };

        let result = sqlx::query("UPDATE pets SET adopted = $2 WHERE id = $1")
            .bind(&pet_id)
            .bind(pet_adopted)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tracing::warn!(request_id = %id, pet_id = %pet_id, "Adoption request references a deleted pet");
        }

        tx.commit().await?;
        Ok(())
    }
}
