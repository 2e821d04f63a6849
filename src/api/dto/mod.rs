//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization with camelCase
//! field names, and validator for input validation.

pub mod adoption;
pub mod auth;
pub mod campaign;
pub mod donation;
pub mod health;
pub mod pagination;
pub mod pet;
pub mod user;
