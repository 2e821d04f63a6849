//! Handlers for donations and refunds.

use axum::{extract::State, http::StatusCode};

use crate::api::dto::campaign::minor;
use crate::api::dto::donation::{DonateRequest, DonationResponse, DonatorResponse};
use crate::api::extract::{Json, Path};
use crate::api::middleware::AuthUser;
use crate::domain::ObjectId;
use crate::error::AppError;
use crate::state::AppState;

/// Donates to a campaign.
///
/// # Endpoint
///
/// `POST /donations/donators/{id}` with `{ "amount": 12.50 }`
///
/// # Flow
///
/// 1. Resolve the caller's user record and the campaign
/// 2. Reject paused, expired or over-cap donations
/// 3. Create a payment intent for the amount in minor units
/// 4. Record the donation and raise the campaign total in one transaction
///
/// The donation is final once the intent exists; the client confirms the
/// payment with `clientSecret`.
///
/// # Errors
///
/// - 400 for a malformed amount or a campaign that cannot take it
/// - 404 if the caller or the campaign does not exist
/// - 500 if the payment provider fails
pub async fn donate_handler(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<DonateRequest>,
) -> Result<(StatusCode, Json<DonationResponse>), AppError> {
    let campaign_id = ObjectId::parse(&id)?;
    let amount = minor("amount", payload.amount)?;

    let receipt = state
        .donation_service
        .donate(&caller.email, &campaign_id, amount)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(DonationResponse {
            donator: receipt.donator.into(),
            client_secret: receipt.client_secret,
        }),
    ))
}

/// Lists the caller's donations.
///
/// # Endpoint
///
/// `GET /my_donations`
pub async fn my_donations_handler(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<Vec<DonatorResponse>>, AppError> {
    let donations = state.donation_service.list_mine(&caller.email).await?;
    Ok(Json(donations.into_iter().map(Into::into).collect()))
}

/// Deletes one of the caller's donation records and lowers the campaign total.
///
/// # Endpoint
///
/// `DELETE /donations/{id}`
pub async fn refund_handler(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = ObjectId::parse(&id)?;
    state.donation_service.refund(&caller.email, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
