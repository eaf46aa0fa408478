//! The structured record embedded in every issued pass.
//!
//! Wire format is a JSON object with fixed, case-sensitive keys:
//!
//! ```text
//! {"identifier": "<uuid>", "issued_at": <unix seconds>, "kind": "<tag>"}
//! ```
//!
//! `kind` is omitted entirely when empty, so a record without a category tag
//! round-trips byte-for-byte. Unknown keys are ignored on the way in, to stay
//! compatible with independent encoders that add fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced by the payload codec.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// The bytes are not a valid payload record: invalid JSON, a missing
    /// required field, or a field of the wrong type.
    #[error("malformed payload: {0}")]
    Malformed(#[source] serde_json::Error),
}

/// The identifier record carried inside an encrypted pass.
///
/// Constructed once at issuance and immutable thereafter. Copies recovered
/// from a token are read-only views of what was issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    /// Globally unique identifier for this issuance.
    pub identifier: String,

    /// Issuance time, seconds since the Unix epoch.
    pub issued_at: i64,

    /// Optional category tag (e.g. `"access"`). Absent on the wire when empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
}

impl TokenPayload {
    /// Serialize to the canonical JSON wire form.
    ///
    /// Never fails for a well-formed record; the `Result` propagates the
    /// serializer's error type rather than panicking.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PayloadError> {
        serde_json::to_vec(self).map_err(PayloadError::Malformed)
    }

    /// Deserialize from the JSON wire form.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::Malformed`] if the bytes are not valid JSON or
    /// a required field is absent or mistyped.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PayloadError> {
        serde_json::from_slice(bytes).map_err(PayloadError::Malformed)
    }
}
