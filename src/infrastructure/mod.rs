//! Infrastructure layer for external integrations.
//!
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`payment`] - Payment provider client (Stripe)

pub mod payment;
pub mod persistence;
