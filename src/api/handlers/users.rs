//! Handlers for user registration and the caller's profile.

use axum::{extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::user::{RegisterUserRequest, RegisterUserResponse, UserResponse};
use crate::api::extract::Json;
use crate::api::middleware::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a user at first sign-in.
///
/// # Endpoint
///
/// `POST /users`
///
/// # Response Codes
///
/// - **201 Created**: New user, `insertedId` set
/// - **200 OK**: Email already registered, `insertedId` is `null` and nothing changed
pub async fn register_user_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<RegisterUserResponse>), AppError> {
    payload.validate()?;

    let (user, inserted) = state.user_service.register(payload.into()).await?;

    let status = if inserted {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        Json(RegisterUserResponse {
            inserted_id: inserted.then(|| user.id.clone()),
            user: user.into(),
        }),
    ))
}

/// Returns the caller's user record.
///
/// # Endpoint
///
/// `GET /users/me`
pub async fn current_user_handler(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.user_service.get_by_email(&caller.email).await?;
    Ok(Json(user.into()))
}
