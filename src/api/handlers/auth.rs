//! Handler for bearer token issuing.

use axum::extract::State;
use validator::Validate;

use crate::api::dto::auth::{TokenRequest, TokenResponse};
use crate::api::extract::Json;
use crate::error::AppError;
use crate::state::AppState;

/// Issues a signed bearer token for the supplied identity.
///
/// # Endpoint
///
/// `POST /jwt`
///
/// # Request Body
///
/// ```json
/// { "email": "jane@example.com", "name": "Jane" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the email is invalid.
/// Returns 403 Forbidden if the user is banned.
pub async fn issue_token_handler(
    State(state): State<AppState>,
    Json(payload): Json<TokenRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    payload.validate()?;

    let issued = state
        .auth_service
        .issue_token(&payload.email, payload.name)
        .await?;

    Ok(Json(TokenResponse {
        token: issued.token,
        expires_at: issued.expires_at,
    }))
}
