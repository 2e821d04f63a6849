//! DTOs for token issuing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body for `POST /jwt`.
#[derive(Debug, Deserialize, Validate)]
pub struct TokenRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(max = 100))]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}
