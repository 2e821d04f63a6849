//! Payment gateway trait and error types.

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised while talking to the payment provider.
#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("payment provider unreachable: {0}")]
    Transport(String),
    #[error("payment provider rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("unexpected payment provider response: {0}")]
    InvalidResponse(String),
}

/// A provider-side handle for an authorized, not necessarily settled, charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    pub id: String,
    /// Secret the client uses to confirm the intent.
    pub client_secret: Option<String>,
    pub status: String,
}

/// Creates payment intents with an external provider.
///
/// # Implementations
///
/// - [`crate::infrastructure::payment::StripeGateway`] - Stripe REST API
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Creates a payment intent for `amount` minor units of `currency`.
    ///
    /// No payment method is attached; the client confirms the intent.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError`] if the provider is unreachable or rejects the request.
    async fn create_intent(
        &self,
        amount: i64,
        currency: &str,
        metadata: HashMap<String, String>,
    ) -> Result<PaymentIntent, PaymentError>;
}
