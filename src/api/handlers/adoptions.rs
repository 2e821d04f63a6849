//! Handlers for adoption request endpoints.

use axum::{extract::State, http::StatusCode};
use serde_json::json;
use validator::Validate;

use crate::api::dto::adoption::{
    AdoptionRequestResponse, CreateAdoptionRequest, CreatedAdoptionResponse,
    UpdateAdoptionStatusRequest,
};
use crate::api::extract::{Json, Path};
use crate::api::middleware::AuthUser;
use crate::domain::ObjectId;
use crate::domain::entities::{AdoptionStatus, NewAdoptionRequest};
use crate::error::AppError;
use crate::state::AppState;

/// Files an adoption request for a pet.
///
/// # Endpoint
///
/// `POST /adoptions`
///
/// # Errors
///
/// - 404 if the pet does not exist
/// - 400 if the pet is adopted or belongs to the caller
/// - 409 if the caller already has a pending request for the pet
pub async fn create_adoption_handler(
    State(state): State<AppState>,
    caller: AuthUser,
    Json(payload): Json<CreateAdoptionRequest>,
) -> Result<(StatusCode, Json<CreatedAdoptionResponse>), AppError> {
    payload.validate()?;
    let pet_id = ObjectId::parse(&payload.pet_id)?;

    let request = state
        .adoption_service
        .create_request(NewAdoptionRequest {
            pet_id,
            requester_email: caller.email,
            requester_name: payload.requester_name,
            phone: payload.phone,
            address: payload.address,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedAdoptionResponse {
            inserted_id: request.id.clone(),
            request: request.into(),
        }),
    ))
}

/// Lists requests filed against the caller's pets.
///
/// # Endpoint
///
/// `GET /adoption_requests`
pub async fn list_adoption_requests_handler(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<Vec<AdoptionRequestResponse>>, AppError> {
    let requests = state.adoption_service.list_for_owner(&caller.email).await?;
    Ok(Json(requests.into_iter().map(Into::into).collect()))
}

/// Accepts or rejects an adoption request.
///
/// # Endpoint
///
/// `PATCH /adoption_requests/{id}` with `{ "status": "accepted" | "rejected" }`
///
/// Accepting marks the pet adopted; rejecting marks it available. Both writes
/// happen together.
///
/// # Errors
///
/// - 400 for any other status
/// - 404 if the request does not exist
/// - 403 unless the caller owns the pet or is an admin
pub async fn update_adoption_request_handler(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateAdoptionStatusRequest>,
) -> Result<StatusCode, AppError> {
    let id = ObjectId::parse(&id)?;
    let status: AdoptionStatus = payload.status.parse().map_err(|_| {
        AppError::bad_request(
            "Status must be 'accepted' or 'rejected'",
            json!({ "status": payload.status }),
        )
    })?;

    let is_admin = state.auth_service.is_admin(&caller.email).await?;

    state
        .adoption_service
        .resolve(&caller.email, is_admin, &id, status)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
