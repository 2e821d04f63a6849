//! Handlers for donation campaign endpoints.

use axum::{extract::State, http::StatusCode};
use serde_json::json;
use validator::Validate;

use crate::api::dto::campaign::{
    CampaignListQuery, CampaignListResponse, CampaignResponse, CreateCampaignRequest,
    CreatedCampaignResponse, PausedResponse, UpdateCampaignRequest,
};
use crate::api::dto::donation::DonatorResponse;
use crate::api::dto::pagination::next_page;
use crate::api::extract::{Json, Path, Query};
use crate::api::middleware::AuthUser;
use crate::domain::ObjectId;
use crate::error::AppError;
use crate::state::AppState;

/// Lists campaigns, newest first, ten per page.
///
/// # Endpoint
///
/// `GET /campaigns?page=1`
pub async fn list_campaigns_handler(
    State(state): State<AppState>,
    Query(query): Query<CampaignListQuery>,
) -> Result<Json<CampaignListResponse>, AppError> {
    let (page, window) = query
        .validate_and_get_window()
        .map_err(|e| AppError::bad_request(e, json!({ "page": query.page })))?;

    let result = state.campaign_service.list_campaigns(window).await?;

    Ok(Json(CampaignListResponse {
        next_page: next_page(page, window, result.items.len(), result.total),
        total: result.total,
        campaigns: result.items.into_iter().map(Into::into).collect(),
    }))
}

/// # Endpoint
///
/// `GET /campaigns/{id}`
pub async fn get_campaign_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CampaignResponse>, AppError> {
    let id = ObjectId::parse(&id)?;
    let campaign = state.campaign_service.get_campaign(&id).await?;
    Ok(Json(campaign.into()))
}

/// Creates a campaign owned by the caller.
///
/// # Endpoint
///
/// `POST /donation_campaigns`
///
/// # Request Body
///
/// ```json
/// {
///   "petName": "Milo",
///   "picture": "https://img.example.com/milo.png",
///   "maxDonationAmount": 500.00,
///   "lastDateOfDonation": "2026-12-31T23:59:59Z",
///   "shortDescription": "Surgery",
///   "longDescription": "Milo needs surgery"
/// }
/// ```
pub async fn create_campaign_handler(
    State(state): State<AppState>,
    caller: AuthUser,
    Json(payload): Json<CreateCampaignRequest>,
) -> Result<(StatusCode, Json<CreatedCampaignResponse>), AppError> {
    payload.validate()?;

    let campaign = state
        .campaign_service
        .create_campaign(payload.into_new_campaign(caller.email)?)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedCampaignResponse {
            inserted_id: campaign.id.clone(),
            campaign: campaign.into(),
        }),
    ))
}

/// Partially updates one of the caller's campaigns.
///
/// # Endpoint
///
/// `PATCH /donation_campaigns/{id}`
pub async fn update_campaign_handler(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateCampaignRequest>,
) -> Result<Json<CampaignResponse>, AppError> {
    let id = ObjectId::parse(&id)?;
    payload.validate()?;

    let campaign = state
        .campaign_service
        .update_as_owner(&caller.email, &id, payload.into_patch()?)
        .await?;
    Ok(Json(campaign.into()))
}

/// Lists the caller's own campaigns.
///
/// # Endpoint
///
/// `GET /user_campaigns`
pub async fn user_campaigns_handler(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<Vec<CampaignResponse>>, AppError> {
    let campaigns = state.campaign_service.list_owned(&caller.email).await?;
    Ok(Json(campaigns.into_iter().map(Into::into).collect()))
}

/// Lists donations made to a campaign. Owner or admin only.
///
/// # Endpoint
///
/// `GET /campaigns/{id}/donators`
pub async fn campaign_donators_handler(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Vec<DonatorResponse>>, AppError> {
    let id = ObjectId::parse(&id)?;
    let is_admin = state.auth_service.is_admin(&caller.email).await?;

    let donators = state
        .campaign_service
        .donators_of(&caller.email, is_admin, &id)
        .await?;
    Ok(Json(donators.into_iter().map(Into::into).collect()))
}

/// Flips the paused flag of one of the caller's campaigns.
///
/// # Endpoint
///
/// `PATCH /donations/pause/{id}`
///
/// # Response
///
/// ```json
/// { "paused": true }
/// ```
pub async fn toggle_pause_handler(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<PausedResponse>, AppError> {
    let id = ObjectId::parse(&id)?;
    let paused = state
        .campaign_service
        .toggle_pause_as_owner(&caller.email, &id)
        .await?;
    Ok(Json(PausedResponse { paused }))
}
