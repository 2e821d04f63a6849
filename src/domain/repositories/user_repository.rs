//! Repository trait for users.

use crate::domain::entities::{NewUser, Role, User};
use crate::domain::object_id::ObjectId;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for users.
///
/// Emails are unique; lookups by email are case-insensitive.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts the user unless the email is already registered.
    ///
    /// # Returns
    ///
    /// The stored user and `true` if this call inserted it, `false` if it existed.
    async fn insert_if_absent(&self, new_user: NewUser) -> Result<(User, bool), AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, AppError>;

    /// Lists every user, newest first.
    async fn list(&self) -> Result<Vec<User>, AppError>;

    async fn count(&self) -> Result<i64, AppError>;

    /// Returns `false` if the user does not exist.
    async fn set_role(&self, id: &ObjectId, role: Role) -> Result<bool, AppError>;

    /// Returns `false` if the user does not exist.
    async fn set_banned(&self, id: &ObjectId, banned: bool) -> Result<bool, AppError>;

    /// Returns `false` if the user does not exist.
    async fn delete(&self, id: &ObjectId) -> Result<bool, AppError>;
}
