//! Domain layer: entities, identifiers and repository contracts.
//!
//! The domain layer has no dependency on HTTP or SQL. Repository traits are
//! implemented in [`crate::infrastructure::persistence`].
//!
//! - [`entities`] - Business data structures
//! - [`object_id`] - 24-character hex record identifiers
//! - [`repositories`] - Data access traits

pub mod entities;
pub mod object_id;
pub mod repositories;

pub use object_id::ObjectId;
