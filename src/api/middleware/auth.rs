//! Bearer token authentication and the admin gate.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::COOKIE, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::domain::entities::normalize_email;
use crate::{error::AppError, state::AppState};

/// Identity of the authenticated caller, attached to request extensions by
/// [`authenticate`].
///
/// Handlers take it as an extractor; it fails with `401 Unauthorized` on routes
/// that are not behind the auth layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub email: String,
    pub name: Option<String>,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| {
                AppError::unauthorized(
                    "Unauthorized",
                    json!({ "reason": "Authentication required" }),
                )
            })
    }
}

/// Authenticates requests using Bearer tokens.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// Clients that cannot set headers may send `Cookie: token=<token>` instead; the
/// header wins when both are present.
///
/// # Authentication Flow
///
/// 1. Extract the token from the `Authorization` header or the `token` cookie
/// 2. Verify signature and expiry
/// 3. Attach [`AuthUser`] to request extensions
/// 4. Continue to next middleware/handler
///
/// # Errors
///
/// Returns `401 Unauthorized` if the token is missing, malformed, forged or
/// expired. The response carries `WWW-Authenticate: Bearer` per RFC 6750.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use crate::api::middleware::auth;
///
/// let protected = Router::new()
///     .route("/user_pets", get(user_pets_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::authenticate));
/// ```
pub async fn authenticate(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let token = match AuthBearer::from_request_parts(&mut parts, &()).await {
        Ok(AuthBearer(token)) => Some(token),
        Err(_) => token_cookie(&parts),
    }
    .ok_or_else(|| {
        AppError::unauthorized(
            "Unauthorized",
            json!({ "reason": "Authorization header is missing or invalid" }),
        )
    })?;

    let claims = st.auth_service.verify(&token)?;
    parts.extensions.insert(AuthUser {
        email: normalize_email(&claims.email),
        name: claims.name,
    });

    let req = Request::from_parts(parts, body);

    Ok(next.run(req).await)
}

/// Requires the authenticated caller to hold the admin role.
///
/// Must run after [`authenticate`]. With axum's `route_layer`, the layer added
/// last runs first, so add this one before the auth layer:
///
/// ```rust,ignore
/// let admin = admin_routes()
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_admin))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::authenticate));
/// ```
///
/// # Errors
///
/// Returns `401 Unauthorized` if no [`AuthUser`] is attached.
/// Returns `403 Forbidden` if the caller has no user record or is not an admin.
pub async fn require_admin(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &()).await?;

    let admin = st.auth_service.require_admin(&user.email).await?;
    tracing::debug!(admin = %admin.email, "Admin access granted");

    Ok(next.run(Request::from_parts(parts, body)).await)
}

fn token_cookie(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(COOKIE)
        .and_then(|cookie_header| cookie_header.to_str().ok())
        .and_then(|cookie_str| {
            cookie_str.split(';').find_map(|cookie| {
                let mut kv = cookie.trim().splitn(2, '=');
                match (kv.next(), kv.next()) {
                    (Some("token"), Some(value)) if !value.is_empty() => Some(value.to_string()),
                    _ => None,
                }
            })
        })
}
