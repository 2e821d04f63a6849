//! Handlers for administrative endpoints.
//!
//! Every route here sits behind [`crate::api::middleware::auth::require_admin`].

use axum::{extract::State, http::StatusCode};

use crate::api::dto::campaign::{CampaignResponse, SetPausedRequest};
use crate::api::dto::pet::{PetResponse, SetAdoptedRequest};
use crate::api::dto::user::UserResponse;
use crate::api::extract::{Json, Path};
use crate::domain::ObjectId;
use crate::domain::entities::PetFilter;
use crate::domain::repositories::PageRequest;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /admin/users`
pub async fn admin_list_users_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state.user_service.list_users().await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// `GET /admin/pets`
pub async fn admin_list_pets_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<PetResponse>>, AppError> {
    let page = state
        .pet_service
        .list_pets(&PetFilter::default(), PageRequest::ALL)
        .await?;
    Ok(Json(page.items.into_iter().map(Into::into).collect()))
}

/// `GET /admin/campaigns`
pub async fn admin_list_campaigns_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<CampaignResponse>>, AppError> {
    let page = state.campaign_service.list_campaigns(PageRequest::ALL).await?;
    Ok(Json(page.items.into_iter().map(Into::into).collect()))
}

/// `PATCH /admin/users/{id}/promote`
pub async fn promote_user_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = ObjectId::parse(&id)?;
    state.user_service.promote(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PATCH /admin/users/{id}/ban`
pub async fn ban_user_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = ObjectId::parse(&id)?;
    state.user_service.ban(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /admin/users/{id}`
pub async fn admin_delete_user_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = ObjectId::parse(&id)?;
    state.user_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Force-sets a pet's adoption flag.
///
/// `PATCH /admin/pets/{id}` with `{ "adopted": true }`
pub async fn admin_set_pet_adopted_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<SetAdoptedRequest>,
) -> Result<StatusCode, AppError> {
    let id = ObjectId::parse(&id)?;
    state.pet_service.set_adopted(&id, payload.adopted).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /admin/pets/{id}`
pub async fn admin_delete_pet_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = ObjectId::parse(&id)?;
    state.pet_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Pauses or resumes any campaign.
///
/// `PATCH /admin/campaigns/{id}/pause` with `{ "paused": true }`
pub async fn admin_set_campaign_paused_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<SetPausedRequest>,
) -> Result<StatusCode, AppError> {
    let id = ObjectId::parse(&id)?;
    state.campaign_service.set_paused(&id, payload.paused).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /admin/campaigns/{id}`
pub async fn admin_delete_campaign_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = ObjectId::parse(&id)?;
    state.campaign_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
