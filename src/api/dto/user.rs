//! DTOs for user endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::ObjectId;
use crate::domain::entities::{NewUser, Role, User};

/// Request body for `POST /users`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(url(message = "Invalid photo URL"))]
    pub photo: Option<String>,
}

impl From<RegisterUserRequest> for NewUser {
    fn from(req: RegisterUserRequest) -> Self {
        NewUser {
            email: req.email,
            name: req.name,
            photo: req.photo,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: ObjectId,
    pub email: String,
    pub name: String,
    pub photo: Option<String>,
    pub role: Role,
    pub banned: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
            photo: u.photo,
            role: u.role,
            banned: u.banned,
            created_at: u.created_at,
        }
    }
}

/// Response for `POST /users`.
///
/// `insertedId` is `null` when the user already existed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserResponse {
    pub inserted_id: Option<ObjectId>,
    pub user: UserResponse,
}
