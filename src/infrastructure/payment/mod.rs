//! Payment provider integration.
//!
//! Provides a [`PaymentGateway`] trait with the [`StripeGateway`] implementation.
//! Only payment-intent creation is supported; settlement is not observed.

mod gateway;
mod stripe;

pub use gateway::{PaymentError, PaymentGateway, PaymentIntent};
pub use stripe::StripeGateway;

#[cfg(test)]
pub use gateway::MockPaymentGateway;
