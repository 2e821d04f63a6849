//! PostgreSQL implementation of user repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUser, Role, User};
use crate::domain::object_id::ObjectId;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

const USER_COLUMNS: &str = "id, email, name, photo, role, banned, created_at";

#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    email: String,
    name: String,
    photo: Option<String>,
    role: String,
    banned: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(r: UserRow) -> Result<Self, Self::Error> {
        let role = r
            .role
            .parse::<Role>()
            .map_err(|e| AppError::internal("Corrupt user record", json!({ "id": r.id, "reason": e })))?;

        Ok(User {
            id: ObjectId::from_db(r.id),
            email: r.email,
            name: r.name,
            photo: r.photo,
            role,
            banned: r.banned,
            created_at: r.created_at,
        })
    }
}

/// PostgreSQL repository for users.
///
/// Relies on the unique constraint on `email` for idempotent registration.
pub struct PgUserRepository {
    pool: Arc<PgPool>,
}

impl PgUserRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn insert_if_absent(&self, new_user: NewUser) -> Result<(User, bool), AppError> {
        let sql = format!(
            r#"
            INSERT INTO users (id, email, name, photo)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO NOTHING
            RETURNING {USER_COLUMNS}
            "#
        );

        let inserted = sqlx::query_as::<_, UserRow>(&sql)
            .bind(ObjectId::generate().as_str())
            .bind(&new_user.email)
            .bind(&new_user.name)
            .bind(&new_user.photo)
            .fetch_optional(self.pool.as_ref())
            .await?;

        if let Some(row) = inserted {
            return Ok((row.try_into()?, true));
        }

        let existing = self.find_by_email(&new_user.email).await?.ok_or_else(|| {
            AppError::internal(
                "User vanished during registration",
                json!({ "email": new_user.email }),
            )
        })?;

        Ok((existing, false))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(email)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id.as_str())
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC, id DESC");

        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .fetch_all(self.pool.as_ref())
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn set_role(&self, id: &ObjectId, role: Role) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE users SET role = $2 WHERE id = $1")
            .bind(id.as_str())
            .bind(role.as_str())
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_banned(&self, id: &ObjectId, banned: bool) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE users SET banned = $2 WHERE id = $1")
            .bind(id.as_str())
            .bind(banned)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_str())
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
