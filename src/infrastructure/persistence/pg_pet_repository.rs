//! PostgreSQL implementation of pet repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewPet, Pet, PetFilter, PetPatch};
use crate::domain::object_id::ObjectId;
use crate::domain::repositories::{Page, PageRequest, PetRepository};
use crate::error::AppError;

const PET_COLUMNS: &str = "id, image, name, age, category, location, short_description, \
     long_description, date_added, adopted, owner_email";

#[derive(sqlx::FromRow)]
struct PetRow {
    id: String,
    image: String,
    name: String,
    age: i32,
    category: String,
    location: String,
    short_description: String,
    long_description: String,
    date_added: DateTime<Utc>,
    adopted: bool,
    owner_email: String,
}

impl From<PetRow> for Pet {
    fn from(r: PetRow) -> Self {
        Pet {
            id: ObjectId::from_db(r.id),
            image: r.image,
            name: r.name,
            age: r.age,
            category: r.category,
            location: r.location,
            short_description: r.short_description,
            long_description: r.long_description,
            date_added: r.date_added,
            adopted: r.adopted,
            owner_email: r.owner_email,
        }
    }
}

/// PostgreSQL repository for pet listings.
pub struct PgPetRepository {
    pool: Arc<PgPool>,
}

impl PgPetRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PetRepository for PgPetRepository {
    async fn create(&self, new_pet: NewPet) -> Result<Pet, AppError> {
        let sql = format!(
            r#"
            INSERT INTO pets (id, image, name, age, category, location,
                              short_description, long_description, owner_email)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {PET_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, PetRow>(&sql)
            .bind(ObjectId::generate().as_str())
            .bind(new_pet.image)
            .bind(new_pet.name)
            .bind(new_pet.age)
            .bind(new_pet.category)
            .bind(new_pet.location)
            .bind(new_pet.short_description)
            .bind(new_pet.long_description)
            .bind(new_pet.owner_email)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Pet>, AppError> {
        let sql = format!("SELECT {PET_COLUMNS} FROM pets WHERE id = $1");

        let row = sqlx::query_as::<_, PetRow>(&sql)
            .bind(id.as_str())
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn list(&self, filter: &PetFilter, page: PageRequest) -> Result<Page<Pet>, AppError> {
        // NULL parameters disable their predicate. `strpos` keeps `%` and `_` in the
        // search term literal.
        const WHERE: &str = r#"
            WHERE ($1::TEXT IS NULL OR category = $1)
              AND ($2::TEXT IS NULL OR strpos(lower(name), lower($2)) > 0)
              AND ($3::BOOLEAN IS NULL OR adopted = $3)
              AND ($4::TEXT IS NULL OR owner_email = $4)
        "#;

        let sql = format!(
            "SELECT {PET_COLUMNS} FROM pets {WHERE} ORDER BY date_added DESC, id DESC OFFSET $5 LIMIT $6"
        );

        let rows = sqlx::query_as::<_, PetRow>(&sql)
            .bind(filter.category.as_deref())
            .bind(filter.search.as_deref())
            .bind(filter.adopted)
            .bind(filter.owner_email.as_deref())
            .bind(page.skip)
            .bind(page.limit)
            .fetch_all(self.pool.as_ref())
            .await?;

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM pets {WHERE}"))
            .bind(filter.category.as_deref())
            .bind(filter.search.as_deref())
            .bind(filter.adopted)
            .bind(filter.owner_email.as_deref())
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(Page {
            items: rows.into_iter().map(Into::into).collect(),
            total,
        })
    }

    async fn update(&self, id: &ObjectId, patch: PetPatch) -> Result<Option<Pet>, AppError> {
        let sql = format!(
            r#"
            UPDATE pets SET
                image             = COALESCE($2, image),
                name              = COALESCE($3, name),
                age               = COALESCE($4, age),
                category          = COALESCE($5, category),
                location          = COALESCE($6, location),
                short_description = COALESCE($7, short_description),
                long_description  = COALESCE($8, long_description),
                adopted           = COALESCE($9, adopted)
            WHERE id = $1
            RETURNING {PET_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, PetRow>(&sql)
            .bind(id.as_str())
            .bind(patch.image)
            .bind(patch.name)
            .bind(patch.age)
            .bind(patch.category)
            .bind(patch.location)
            .bind(patch.short_description)
            .bind(patch.long_description)
            .bind(patch.adopted)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn set_adopted(&self, id: &ObjectId, adopted: bool) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE pets SET adopted = $2 WHERE id = $1")
            .bind(id.as_str())
            .bind(adopted)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM pets WHERE id = $1")
            .bind(id.as_str())
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
