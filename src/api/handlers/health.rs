//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};
use std::time::Instant;

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// The payment provider is not called; its check only reports the configured
/// currency.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "message": "Connected, 42 users", "latencyMs": 3 },
///     "payments": { "status": "ok", "message": "Provider configured, currency usd" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let checks = HealthChecks {
        database: check_database(&state).await,
        payments: CheckStatus {
            status: "ok".to_string(),
            message: Some(format!(
                "Provider configured, currency {}",
                state.donation_service.currency()
            )),
            latency_ms: None,
        },
    };
    let healthy = checks.database.is_ok() && checks.payments.is_ok();

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks,
    };

    if healthy {
        Ok(Json(response))
    } else {
        tracing::warn!("Health check degraded");
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_database(state: &AppState) -> CheckStatus {
    let started = Instant::now();
    let result = state.user_service.count_users().await;
    let latency_ms = Some(started.elapsed().as_millis() as u64);

    match result {
        Ok(count) => CheckStatus {
            status: "ok".to_string(),
            message: Some(format!("Connected, {count} users")),
            latency_ms,
        },
        Err(e) => CheckStatus {
            status: "error".to_string(),
            message: Some(format!("Database error: {e}")),
            latency_ms,
        },
    }
}
