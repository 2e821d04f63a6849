//! Authentication service: bearer token issuing, verification and admin checks.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{User, normalize_email};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// Identity claims carried by every bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

/// A freshly signed token and its expiry.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Service issuing and verifying HS256-signed bearer tokens.
///
/// Tokens expire after a fixed time-to-live; there is no refresh or revocation.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `users` - user repository, consulted for bans and roles
    /// - `secret` - HMAC signing secret
    /// - `ttl` - token lifetime
    pub fn new(users: Arc<dyn UserRepository>, secret: &str, ttl: Duration) -> Self {
        Self {
            users,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Signs a token for a caller-supplied identity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the email is blank.
    /// Returns [`AppError::Forbidden`] if the user is registered and banned.
    /// Returns [`AppError::Internal`] if signing fails.
    pub async fn issue_token(
        &self,
        email: &str,
        name: Option<String>,
    ) -> Result<IssuedToken, AppError> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(AppError::bad_request("Email is required", json!({})));
        }

        if let Some(user) = self.users.find_by_email(&email).await?
            && user.banned
        {
            return Err(AppError::forbidden(
                "User is banned",
                json!({ "email": email }),
            ));
        }

        let now = Utc::now();
        let expires_at = now + self.ttl;
        let claims = Claims {
            email,
            name,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal("Failed to sign token", json!({ "reason": e.to_string() })))?;

        tracing::info!(email = %claims.email, "Issued bearer token");

        Ok(IssuedToken { token, expires_at })
    }

    /// Verifies signature and expiry and returns the decoded claims.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is malformed, forged or expired.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected bearer token");
                AppError::unauthorized(
                    "Unauthorized",
                    json!({ "reason": "Invalid or expired token" }),
                )
            })
    }

    /// Loads the caller's user record and requires the admin role.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] if the caller is unknown or not an admin.
    pub async fn require_admin(&self, email: &str) -> Result<User, AppError> {
        match self.users.find_by_email(&normalize_email(email)).await? {
            Some(user) if user.is_admin() => Ok(user),
            _ => Err(AppError::forbidden(
                "Forbidden",
                json!({ "reason": "Admin role required" }),
            )),
        }
    }

    /// Whether the caller holds the admin role.
    pub async fn is_admin(&self, email: &str) -> Result<bool, AppError> {
        Ok(self
            .users
            .find_by_email(&normalize_email(email))
            .await?
            .is_some_and(|u| u.is_admin()))
    }
}
