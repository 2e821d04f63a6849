//! User registration and administration.

use serde_json::json;
use std::sync::Arc;

use crate::domain::ObjectId;
use crate::domain::entities::{NewUser, Role, User, normalize_email};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// Service for user registration and role management.
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Registers a user at first sign-in.
    ///
    /// Idempotent: a second call with the same email returns the stored user and
    /// `false` without writing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the email is blank.
    pub async fn register(&self, mut new_user: NewUser) -> Result<(User, bool), AppError> {
        new_user.email = normalize_email(&new_user.email);
        if new_user.email.is_empty() {
            return Err(AppError::bad_request("Email is required", json!({})));
        }

        let (user, inserted) = self.repository.insert_if_absent(new_user).await?;
        if inserted {
            tracing::info!(user_id = %user.id, email = %user.email, "Registered user");
        }

        Ok((user, inserted))
    }

    /// Returns the caller's own record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the caller never registered.
    pub async fn get_by_email(&self, email: &str) -> Result<User, AppError> {
        let email = normalize_email(email);
        self.repository
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "email": email })))
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.repository.list().await
    }

    pub async fn count_users(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }

    /// Grants the admin role.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    pub async fn promote(&self, id: &ObjectId) -> Result<(), AppError> {
        if !self.repository.set_role(id, Role::Admin).await? {
            return Err(user_not_found(id));
        }
        tracing::info!(user_id = %id, "Promoted user to admin");
        Ok(())
    }

    /// Marks a user as banned; banned users are refused new tokens.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    pub async fn ban(&self, id: &ObjectId) -> Result<(), AppError> {
        if !self.repository.set_banned(id, true).await? {
            return Err(user_not_found(id));
        }
        tracing::info!(user_id = %id, "Banned user");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    pub async fn delete(&self, id: &ObjectId) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(user_not_found(id));
        }
        tracing::info!(user_id = %id, "Deleted user");
        Ok(())
    }
}

fn user_not_found(id: &ObjectId) -> AppError {
    AppError::not_found("User not found", json!({ "id": id }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUserRepository;
    use chrono::Utc;

    fn stored(email: &str) -> User {
        User {
            id: ObjectId::generate(),
            email: email.to_string(),
            name: "Jane".to_string(),
            photo: None,
            role: Role::User,
            banned: false,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_normalizes_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_insert_if_absent()
            .withf(|u| u.email == "jane@example.com")
            .times(1)
            .returning(|u| Ok((stored(&u.email), true)));

        let service = UserService::new(Arc::new(repo));
        let (user, inserted) = service
            .register(NewUser {
                email: " Jane@Example.com ".to_string(),
                name: "Jane".to_string(),
                photo: None,
            })
            .await
            .unwrap();

        assert!(inserted);
        assert_eq!(user.email, "jane@example.com");
    }

    #[tokio::test]
    async fn test_register_blank_email() {
        let service = UserService::new(Arc::new(MockUserRepository::new()));
        let result = service
            .register(NewUser {
                email: "".to_string(),
                name: "Nobody".to_string(),
                photo: None,
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_promote_missing_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_set_role().times(1).returning(|_, _| Ok(false));

        let service = UserService::new(Arc::new(repo));
        let result = service.promote(&ObjectId::generate()).await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_ban_sets_flag() {
        let mut repo = MockUserRepository::new();
        repo.expect_set_banned()
            .withf(|_, banned| *banned)
            .times(1)
            .returning(|_, _| Ok(true));

        let service = UserService::new(Arc::new(repo));
        assert!(service.ban(&ObjectId::generate()).await.is_ok());
    }
}
