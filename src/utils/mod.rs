//! Utility functions shared by the HTTP layer.
//!
//! - [`money`] - Decimal currency amounts to integer minor units
//! - [`client_ip`] - Client address resolution for logging

pub mod client_ip;
pub mod money;
