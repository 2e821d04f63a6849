//! Client address resolution.

use axum::http::HeaderMap;
use std::net::{IpAddr, Ipv4Addr};

/// Resolves the client IP for a request.
///
/// With `behind_proxy`, the first `X-Forwarded-For` entry wins, then
/// `X-Real-IP`. Otherwise only the socket peer is trusted. Requests without any
/// usable address resolve to `0.0.0.0` and share one bucket.
pub fn client_ip(headers: &HeaderMap, peer: Option<IpAddr>, behind_proxy: bool) -> IpAddr {
    if behind_proxy {
        let forwarded = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .and_then(|v| v.trim().parse::<IpAddr>().ok());

        let real_ip = || {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<IpAddr>().ok())
        };

        if let Some(ip) = forwarded.or_else(real_ip) {
            return ip;
        }
    }

    peer.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}
