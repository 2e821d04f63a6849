//! Handlers for pet listing endpoints.

use axum::{extract::State, http::StatusCode};
use serde_json::json;
use validator::Validate;

use crate::api::dto::pagination::next_page;
use crate::api::dto::pet::{
    CreatePetRequest, CreatedPetResponse, PetListQuery, PetListResponse, PetResponse,
    SetAdoptedRequest, UpdatePetRequest,
};
use crate::api::extract::{Json, Path, Query};
use crate::api::middleware::AuthUser;
use crate::domain::ObjectId;
use crate::error::AppError;
use crate::state::AppState;

/// Lists pets, newest first, ten per page.
///
/// # Endpoint
///
/// `GET /pets?page=1&category=cat&search=lu&adopted=false`
///
/// # Response
///
/// ```json
/// { "pets": [ ... ], "nextPage": 2, "total": 25 }
/// ```
///
/// `nextPage` is `null` on the last page.
pub async fn list_pets_handler(
    State(state): State<AppState>,
    Query(query): Query<PetListQuery>,
) -> Result<Json<PetListResponse>, AppError> {
    let (page, window) = query
        .pagination
        .validate_and_get_window()
        .map_err(|e| AppError::bad_request(e, json!({ "page": query.pagination.page })))?;

    let result = state.pet_service.list_pets(&query.filter(), window).await?;

    Ok(Json(PetListResponse {
        next_page: next_page(page, window, result.items.len(), result.total),
        total: result.total,
        pets: result.items.into_iter().map(Into::into).collect(),
    }))
}

/// Returns a single pet.
///
/// # Endpoint
///
/// `GET /pets/{id}`
///
/// # Errors
///
/// Returns 400 Bad Request for a malformed id and 404 Not Found if the pet
/// does not exist.
pub async fn get_pet_handler(
    State(state): State<AppState>,
    _caller: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<PetResponse>, AppError> {
    let id = ObjectId::parse(&id)?;
    let pet = state.pet_service.get_pet(&id).await?;
    Ok(Json(pet.into()))
}

/// Lists the caller's own pets.
///
/// # Endpoint
///
/// `GET /user_pets`
pub async fn user_pets_handler(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<Vec<PetResponse>>, AppError> {
    let pets = state.pet_service.list_owned(&caller.email).await?;
    Ok(Json(pets.into_iter().map(Into::into).collect()))
}

/// Lists a pet owned by the caller.
///
/// # Endpoint
///
/// `POST /pets`
pub async fn create_pet_handler(
    State(state): State<AppState>,
    caller: AuthUser,
    Json(payload): Json<CreatePetRequest>,
) -> Result<(StatusCode, Json<CreatedPetResponse>), AppError> {
    payload.validate()?;

    let pet = state
        .pet_service
        .create_pet(payload.into_new_pet(caller.email))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedPetResponse {
            inserted_id: pet.id.clone(),
            pet: pet.into(),
        }),
    ))
}

/// Sets the adoption flag on one of the caller's pets.
///
/// # Endpoint
///
/// `PATCH /pets/{id}` with `{ "adopted": true }`
///
/// # Errors
///
/// Returns 403 Forbidden if the caller does not own the pet.
pub async fn set_adopted_handler(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<SetAdoptedRequest>,
) -> Result<StatusCode, AppError> {
    let id = ObjectId::parse(&id)?;
    state
        .pet_service
        .set_adopted_as_owner(&caller.email, &id, payload.adopted)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Partially updates one of the caller's pets.
///
/// # Endpoint
///
/// `PATCH /update_pets/{id}`
pub async fn update_pet_handler(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdatePetRequest>,
) -> Result<Json<PetResponse>, AppError> {
    let id = ObjectId::parse(&id)?;
    payload.validate()?;

    let pet = state
        .pet_service
        .update_as_owner(&caller.email, &id, payload.into())
        .await?;
    Ok(Json(pet.into()))
}

/// Deletes one of the caller's pets. Adoption requests for it are kept.
///
/// # Endpoint
///
/// `DELETE /pets/{id}`
pub async fn delete_pet_handler(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = ObjectId::parse(&id)?;
    state.pet_service.delete_as_owner(&caller.email, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
