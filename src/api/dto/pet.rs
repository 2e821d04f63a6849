//! DTOs for pet listing endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use validator::Validate;

use crate::api::dto::pagination::PaginationParams;
use crate::domain::ObjectId;
use crate::domain::entities::{NewPet, Pet, PetFilter, PetPatch};

/// Query parameters for `GET /pets`.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct PetListQuery {
    #[serde(flatten)]
    pub pagination: PaginationParams,

    pub category: Option<String>,

    /// Case-insensitive substring of the pet name.
    pub search: Option<String>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub adopted: Option<bool>,
}

impl PetListQuery {
    pub fn filter(&self) -> PetFilter {
        PetFilter {
            category: non_blank(self.category.as_deref()),
            search: non_blank(self.search.as_deref()),
            adopted: self.adopted,
            owner_email: None,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Request body for `POST /pets`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePetRequest {
    #[validate(url(message = "Invalid image URL"))]
    pub image: String,

    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(range(min = 0, max = 100))]
    pub age: i32,

    #[validate(length(min = 1, max = 50))]
    pub category: String,

    #[validate(length(min = 1, max = 200))]
    pub location: String,

    #[validate(length(min = 1, max = 300))]
    pub short_description: String,

    #[validate(length(min = 1, max = 5000))]
    pub long_description: String,
}

impl CreatePetRequest {
    pub fn into_new_pet(self, owner_email: String) -> NewPet {
        NewPet {
            image: self.image,
            name: self.name,
            age: self.age,
            category: self.category,
            location: self.location,
            short_description: self.short_description,
            long_description: self.long_description,
            owner_email,
        }
    }
}

/// Request body for `PATCH /update_pets/{id}`.
///
/// All fields are optional; only provided fields are changed.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePetRequest {
    #[validate(url(message = "Invalid image URL"))]
    pub image: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(range(min = 0, max = 100))]
    pub age: Option<i32>,

    #[validate(length(min = 1, max = 50))]
    pub category: Option<String>,

    #[validate(length(min = 1, max = 200))]
    pub location: Option<String>,

    #[validate(length(min = 1, max = 300))]
    pub short_description: Option<String>,

    #[validate(length(min = 1, max = 5000))]
    pub long_description: Option<String>,

    pub adopted: Option<bool>,
}

impl From<UpdatePetRequest> for PetPatch {
    fn from(req: UpdatePetRequest) -> Self {
        PetPatch {
            image: req.image,
            name: req.name,
            age: req.age,
            category: req.category,
            location: req.location,
            short_description: req.short_description,
            long_description: req.long_description,
            adopted: req.adopted,
        }
    }
}

/// Request body for `PATCH /pets/{id}` and `PATCH /admin/pets/{id}`.
#[derive(Debug, Deserialize)]
pub struct SetAdoptedRequest {
    pub adopted: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PetResponse {
    pub id: ObjectId,
    pub image: String,
    pub name: String,
    pub age: i32,
    pub category: String,
    pub location: String,
    pub short_description: String,
    pub long_description: String,
    pub date_added: DateTime<Utc>,
    pub adopted: bool,
    pub owner_email: String,
}

impl From<Pet> for PetResponse {
    fn from(pet: Pet) -> Self {
        Self {
            id: pet.id,
            image: pet.image,
            name: pet.name,
            age: pet.age,
            category: pet.category,
            location: pet.location,
            short_description: pet.short_description,
            long_description: pet.long_description,
            date_added: pet.date_added,
            adopted: pet.adopted,
            owner_email: pet.owner_email,
        }
    }
}

/// Response for `GET /pets`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PetListResponse {
    pub pets: Vec<PetResponse>,
    pub next_page: Option<u32>,
    pub total: i64,
}

/// Response for `POST /pets`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedPetResponse {
    pub inserted_id: ObjectId,
    pub pet: PetResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_camel_case_and_validation() {
        let req: CreatePetRequest = serde_json::from_str(
            r#"{
                "image": "https://img.example.com/rex.png",
                "name": "Rex",
                "age": 3,
                "category": "dog",
                "location": "Dhaka",
                "shortDescription": "Friendly",
                "longDescription": "A friendly dog"
            }"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());

        let bad: CreatePetRequest = serde_json::from_str(
            r#"{
                "image": "not a url",
                "name": "",
                "age": -1,
                "category": "dog",
                "location": "Dhaka",
                "shortDescription": "Friendly",
                "longDescription": "A friendly dog"
            }"#,
        )
        .unwrap();
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("image"));
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("age"));
    }

    #[test]
    fn test_list_query_filter_ignores_blank_values() {
        let query = PetListQuery {
            category: Some("  ".to_string()),
            search: Some(" rex ".to_string()),
            adopted: Some(false),
            ..Default::default()
        };
        let filter = query.filter();
        assert_eq!(filter.category, None);
        assert_eq!(filter.search.as_deref(), Some("rex"));
        assert_eq!(filter.adopted, Some(false));
    }
}
