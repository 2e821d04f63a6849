//! Opaque 24-character hex identifiers shared by every collection.

use chrono::Utc;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use std::sync::LazyLock;

use crate::error::AppError;

static OBJECT_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-fA-F]{24}$").unwrap());

/// Record identifier: 4-byte big-endian creation second followed by 8 random bytes,
/// rendered as 24 lowercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    /// Generates a fresh identifier.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 12];
        let secs = Utc::now().timestamp() as u32;
        bytes[..4].copy_from_slice(&secs.to_be_bytes());
        rand::rng().fill(&mut bytes[4..]);
        Self(hex::encode(bytes))
    }

    /// Parses a caller-supplied identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the input is not 24 hex characters.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        if !OBJECT_ID_REGEX.is_match(raw) {
            return Err(AppError::bad_request(
                "Malformed identifier",
                json!({ "id": raw, "hint": "Expected 24 hexadecimal characters" }),
            ));
        }

        Ok(Self(raw.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Wraps a value read back from storage without re-validating it.
    pub(crate) fn from_db(raw: String) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
