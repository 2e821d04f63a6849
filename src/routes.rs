//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`            - Health check (public)
//! - `GET  /pets`, `/campaigns` - Public listings
//! - `POST /jwt`, `/users`     - Sign-in (public, rate limited)
//! - everything else           - Bearer token required
//! - `/admin/*`                - Bearer token and admin role required
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on sign-in routes
//! - **Authentication** - Bearer token, admin gate layered on top
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use anyhow::Result;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> Result<NormalizePath<Router>> {
    let router = api_router(state, behind_proxy)?;
    Ok(NormalizePathLayer::trim_trailing_slash().layer(router))
}

/// All routes with their guards, without path normalization.
pub fn api_router(state: AppState, behind_proxy: bool) -> Result<Router> {
    let sign_in = api::routes::sign_in_routes().layer(rate_limit::layer(behind_proxy)?);

    let protected = api::routes::protected_routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        auth::authenticate,
    ));

    // route_layer: the layer added last runs first.
    let admin = api::routes::admin_routes()
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_admin,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::authenticate,
        ));

    Ok(Router::new()
        .route("/health", get(health_handler))
        .merge(api::routes::public_routes())
        .merge(sign_in)
        .merge(protected)
        .nest("/admin", admin)
        .with_state(state)
        .layer(tracing::layer()))
}
