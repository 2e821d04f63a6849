//! Stripe-backed payment gateway.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use super::gateway::{PaymentError, PaymentGateway, PaymentIntent};

#[derive(Debug, Deserialize)]
struct StripeIntent {
    id: String,
    client_secret: Option<String>,
    status: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    message: Option<String>,
}

/// Payment gateway calling `POST /v1/payment_intents` on the Stripe API.
pub struct StripeGateway {
    client: reqwest::Client,
    api_base: String,
    secret_key: String,
}

impl StripeGateway {
    /// Creates a gateway for `api_base` (normally `https://api.stripe.com`).
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::Transport`] if the HTTP client cannot be built.
    pub fn new(api_base: &str, secret_key: String) -> Result<Self, PaymentError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| PaymentError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            secret_key,
        })
    }

    fn intents_url(&self) -> String {
        format!("{}/v1/payment_intents", self.api_base)
    }
}

/// Encodes intent parameters the way Stripe expects form bodies.
fn intent_form(amount: i64, currency: &str, metadata: &HashMap<String, String>) -> Vec<(String, String)> {
    let mut form = vec![
        ("amount".to_string(), amount.to_string()),
        ("currency".to_string(), currency.to_string()),
        ("payment_method_types[]".to_string(), "card".to_string()),
    ];

    let mut keys: Vec<_> = metadata.keys().collect();
    keys.sort();
    for key in keys {
        form.push((format!("metadata[{key}]"), metadata[key].clone()));
    }

    form
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_intent(
        &self,
        amount: i64,
        currency: &str,
        metadata: HashMap<String, String>,
    ) -> Result<PaymentIntent, PaymentError> {
        let response = self
            .client
            .post(self.intents_url())
            .bearer_auth(&self.secret_key)
            .form(&intent_form(amount, currency, &metadata))
            .send()
            .await
            .map_err(|e| PaymentError::Transport(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let message = response
                .json::<StripeErrorBody>()
                .await
                .ok()
                .and_then(|b| b.error.message)
                .unwrap_or_else(|| status.to_string());

            tracing::warn!(status = status.as_u16(), reason = %message, "Payment intent rejected");
            return Err(PaymentError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let intent = response
            .json::<StripeIntent>()
            .await
            .map_err(|e| PaymentError::InvalidResponse(e.to_string()))?;

        tracing::debug!(intent_id = %intent.id, status = %intent.status, "Payment intent created");

        Ok(PaymentIntent {
            id: intent.id,
            client_secret: intent.client_secret,
            status: intent.status,
        })
    }
}
