//! Issue and validate encrypted QR access passes.
//!
//! A pass is a [`TokenPayload`] serialized to JSON, sealed with AES-256-GCM,
//! and carried as a base64url token string inside a QR symbol. There is no
//! token database: possession of a token that opens and parses under the
//! issuing key is the entire proof of validity.
//!
//! The symmetric key is an opaque caller-owned secret, passed explicitly at
//! every call boundary and never retained.

pub mod crypto;
pub mod render;

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;
use uuid::Uuid;

pub use common::payload::{PayloadError, TokenPayload};
pub use crypto::{cipher::CipherError, KEY_LEN};
pub use render::{ImageRenderer, QrRenderer, RenderError};

use crypto::cipher;

/// Failure while sealing or validating a token.
///
/// Callers treat any variant as "invalid token"; the split between
/// [`TokenError::Cipher`] and [`TokenError::Payload`] exists so diagnostics
/// can tell cryptographic rejection apart from format skew.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Text decoding, key validation, or authentication failed.
    #[error("token cipher: {0}")]
    Cipher(#[from] CipherError),

    /// The token decrypted cleanly but its content is not a valid record.
    #[error("token payload: {0}")]
    Payload(#[from] PayloadError),
}

/// Failure while issuing a pass all the way to a rendered image.
#[derive(Debug, Error)]
pub enum IssueError {
    /// Building or sealing the payload failed.
    #[error(transparent)]
    Token(#[from] TokenError),

    /// The renderer rejected the token or the output target.
    #[error("render: {0}")]
    Render(#[from] RenderError),
}

/// A freshly issued pass: the sealed token string and the payload it encodes.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// The record sealed inside the token.
    pub payload: TokenPayload,

    /// Transport form, ready to be rendered or transmitted.
    pub token: String,
}

/// Issue a new pass under `key` with the given category tag.
///
/// Builds a payload with a fresh UUID identifier and the current time,
/// serializes it, and seals it.
///
/// # Errors
///
/// Returns [`TokenError::Cipher`] if `key` is not [`KEY_LEN`] bytes or the
/// entropy source fails.
pub fn issue(key: &[u8], kind: &str) -> Result<IssuedToken, TokenError> {
    let payload = TokenPayload {
        identifier: Uuid::new_v4().to_string(),
        issued_at: unix_now(),
        kind: kind.to_owned(),
    };
    let token = cipher::seal(&payload.to_bytes()?, key)?;
    Ok(IssuedToken { payload, token })
}

/// Issue a new pass and render it to `target`.
///
/// The renderer receives only the finished token string; rendering failures
/// surface unchanged.
pub fn issue_to(
    key: &[u8],
    kind: &str,
    renderer: &dyn QrRenderer,
    target: &Path,
) -> Result<IssuedToken, IssueError> {
    let issued = issue(key, kind)?;
    renderer.render(&issued.token, target)?;
    Ok(issued)
}

/// Validate `token` under `key`, recovering the payload it was issued with.
///
/// # Errors
///
/// Returns [`TokenError::Cipher`] for anything wrong with the token text or
/// its authentication, and [`TokenError::Payload`] when decryption succeeds
/// but the content is not a valid record.
pub fn validate(token: &str, key: &[u8]) -> Result<TokenPayload, TokenError> {
    let plaintext = cipher::open(token, key)?;
    Ok(TokenPayload::from_bytes(&plaintext)?)
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}
