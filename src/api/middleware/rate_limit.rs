//! Rate limiting middleware using token bucket algorithm.

use anyhow::{Context, Result};
use axum::extract::ConnectInfo;
use axum::http::Request;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tower_governor::{
    GovernorError, GovernorLayer, governor::GovernorConfigBuilder, key_extractor::KeyExtractor,
};

use crate::utils::client_ip::client_ip;

/// Keys requests by client IP.
///
/// Reads forwarding headers only when `behind_proxy` is set; see
/// [`crate::utils::client_ip::client_ip`].
#[derive(Debug, Clone, Copy)]
pub struct ClientIpKeyExtractor {
    pub behind_proxy: bool,
}

impl KeyExtractor for ClientIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        let peer = req
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());

        Ok(client_ip(req.headers(), peer, self.behind_proxy))
    }
}

pub type RateLimitLayer =
    GovernorLayer<ClientIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates a rate limiter for the public sign-in endpoints.
///
/// # Limits
///
/// - **Rate**: 2 requests per second
/// - **Burst**: 30 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// Rate limits are applied per client IP address. Set `behind_proxy` only when
/// the service runs behind a trusted reverse proxy.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/jwt", post(issue_token_handler))
///     .layer(rate_limit::layer(false)?);
/// ```
pub fn layer(behind_proxy: bool) -> Result<RateLimitLayer> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(ClientIpKeyExtractor { behind_proxy })
            .per_second(2)
            .burst_size(30)
            .finish()
            .context("Invalid rate limit configuration")?,
    );

    Ok(GovernorLayer::new(governor_conf))
}
