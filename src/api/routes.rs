//! API route configuration.
//!
//! Routes are grouped by the guard they sit behind; [`crate::routes`] attaches
//! the guards.

use crate::api::handlers::{
    admin_delete_campaign_handler, admin_delete_pet_handler, admin_delete_user_handler,
    admin_list_campaigns_handler, admin_list_pets_handler, admin_list_users_handler,
    admin_set_campaign_paused_handler, admin_set_pet_adopted_handler, ban_user_handler,
    campaign_donators_handler, create_adoption_handler, create_campaign_handler,
    create_pet_handler, current_user_handler, delete_pet_handler, donate_handler,
    get_campaign_handler, get_pet_handler, issue_token_handler, list_adoption_requests_handler,
    list_campaigns_handler, list_pets_handler, my_donations_handler, promote_user_handler,
    refund_handler, register_user_handler, set_adopted_handler, toggle_pause_handler,
    update_adoption_request_handler, update_campaign_handler, update_pet_handler,
    user_campaigns_handler, user_pets_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, patch, post},
};

/// Read-only routes open to anonymous callers.
///
/// - `GET /pets`           - Paginated pet listings
/// - `GET /campaigns`      - Paginated campaigns
/// - `GET /campaigns/{id}` - Campaign detail
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/pets", get(list_pets_handler))
        .route("/campaigns", get(list_campaigns_handler))
        .route("/campaigns/{id}", get(get_campaign_handler))
}

/// Sign-in routes, rate limited per client IP.
///
/// - `POST /jwt`   - Issue a bearer token
/// - `POST /users` - Idempotent registration
pub fn sign_in_routes() -> Router<AppState> {
    Router::new()
        .route("/jwt", post(issue_token_handler))
        .route("/users", post(register_user_handler))
}

/// Routes requiring a bearer token.
///
/// # Endpoints
///
/// - `GET    /users/me`                - Caller's user record
/// - `GET    /pets/{id}`               - Pet detail
/// - `POST   /pets`                    - List a pet
/// - `PATCH  /pets/{id}`               - Set adoption flag (owner)
/// - `DELETE /pets/{id}`               - Delete a pet (owner)
/// - `PATCH  /update_pets/{id}`        - Edit a pet (owner)
/// - `GET    /user_pets`               - Caller's pets
/// - `POST   /adoptions`               - File an adoption request
/// - `GET    /adoption_requests`       - Requests for the caller's pets
/// - `PATCH  /adoption_requests/{id}`  - Accept or reject (pet owner or admin)
/// - `POST   /donation_campaigns`      - Create a campaign
/// - `PATCH  /donation_campaigns/{id}` - Edit a campaign (owner)
/// - `GET    /user_campaigns`          - Caller's campaigns
/// - `GET    /campaigns/{id}/donators` - Campaign donations (owner or admin)
/// - `POST   /donations/donators/{id}` - Donate
/// - `GET    /my_donations`            - Caller's donations
/// - `DELETE /donations/{id}`          - Refund (donor)
/// - `PATCH  /donations/pause/{id}`    - Toggle campaign pause (owner)
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(current_user_handler))
        .route("/pets", post(create_pet_handler))
        .route(
            "/pets/{id}",
            get(get_pet_handler)
                .patch(set_adopted_handler)
                .delete(delete_pet_handler),
        )
        .route("/update_pets/{id}", patch(update_pet_handler))
        .route("/user_pets", get(user_pets_handler))
        .route("/adoptions", post(create_adoption_handler))
        .route("/adoption_requests", get(list_adoption_requests_handler))
        .route(
            "/adoption_requests/{id}",
            patch(update_adoption_request_handler),
        )
        .route("/donation_campaigns", post(create_campaign_handler))
        .route("/donation_campaigns/{id}", patch(update_campaign_handler))
        .route("/user_campaigns", get(user_campaigns_handler))
        .route("/campaigns/{id}/donators", get(campaign_donators_handler))
        .route("/donations/donators/{id}", post(donate_handler))
        .route("/my_donations", get(my_donations_handler))
        .route("/donations/{id}", delete(refund_handler))
        .route("/donations/pause/{id}", patch(toggle_pause_handler))
}

/// Administrative routes, nested under `/admin`.
///
/// # Endpoints
///
/// - `GET    /users`                - All users
/// - `PATCH  /users/{id}/promote`   - Grant admin role
/// - `PATCH  /users/{id}/ban`       - Ban a user
/// - `DELETE /users/{id}`           - Delete a user
/// - `GET    /pets`                 - All pets
/// - `PATCH  /pets/{id}`            - Force-set adoption flag
/// - `DELETE /pets/{id}`            - Delete a pet
/// - `GET    /campaigns`            - All campaigns
/// - `PATCH  /campaigns/{id}/pause` - Set paused flag
/// - `DELETE /campaigns/{id}`       - Delete a campaign
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin_list_users_handler))
        .route("/users/{id}/promote", patch(promote_user_handler))
        .route("/users/{id}/ban", patch(ban_user_handler))
        .route("/users/{id}", delete(admin_delete_user_handler))
        .route("/pets", get(admin_list_pets_handler))
        .route(
            "/pets/{id}",
            patch(admin_set_pet_adopted_handler).delete(admin_delete_pet_handler),
        )
        .route("/campaigns", get(admin_list_campaigns_handler))
        .route(
            "/campaigns/{id}/pause",
            patch(admin_set_campaign_paused_handler),
        )
        .route("/campaigns/{id}", delete(admin_delete_campaign_handler))
}
