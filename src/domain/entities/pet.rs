//! Pet listings published by their owners.

use chrono::{DateTime, Utc};

use crate::domain::object_id::ObjectId;

/// A pet listed for adoption.
#[derive(Debug, Clone)]
pub struct Pet {
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

impl Pet {
    /// Whether `email` identifies the owner of this listing.
    pub fn is_owned_by(&self, email: &str) -> bool {
        self.owner_email.eq_ignore_ascii_case(email)
    }
}

/// Input data for listing a new pet.
///
/// The owner comes from the caller's verified identity, never from the request body.
#[derive(Debug, Clone)]
pub struct NewPet {
    pub image: String,
    pub name: String,
    pub age: i32,
    pub category: String,
    pub location: String,
    pub short_description: String,
    pub long_description: String,
    pub owner_email: String,
}

/// Partial update of a pet listing. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct PetPatch {
    pub image: Option<String>,
    pub name: Option<String>,
    pub age: Option<i32>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    pub adopted: Option<bool>,
}

impl PetPatch {
    pub fn is_empty(&self) -> bool {
        self.image.is_none()
            && self.name.is_none()
            && self.age.is_none()
            && self.category.is_none()
            && self.location.is_none()
            && self.short_description.is_none()
            && self.long_description.is_none()
            && self.adopted.is_none()
    }
}

/// Filter for pet listings. Empty filter matches every pet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PetFilter {
    pub category: Option<String>,
    /// Case-insensitive substring of the pet name.
    pub search: Option<String>,
    pub adopted: Option<bool>,
    pub owner_email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pet(owner: &str) -> Pet {
        Pet {
            id: ObjectId::generate(),
            image: "https://img.example.com/rex.png".to_string(),
            name: "Rex".to_string(),
            age: 3,
            category: "dog".to_string(),
            location: "Dhaka".to_string(),
            short_description: "Friendly".to_string(),
            long_description: "Very friendly dog".to_string(),
            date_added: Utc::now(),
            adopted: false,
            owner_email: owner.to_string(),
        }
    }

    #[test]
    fn test_is_owned_by_ignores_case() {
        let p = pet("Owner@Example.com");
        assert!(p.is_owned_by("owner@example.com"));
        assert!(!p.is_owned_by("other@example.com"));
    }

    #[test]
    fn test_patch_default_is_empty() {
        assert!(PetPatch::default().is_empty());
        let patch = PetPatch {
            adopted: Some(true),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
