//! AES-256-GCM sealing and opening of token byte payloads.
//!
//! Every seal draws a fresh 96-bit nonce from the OS CSPRNG. Nonce reuse
//! under the same key is catastrophic for GCM, so no caller-supplied nonce
//! path exists outside of tests.

use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use base64::{
    alphabet,
    engine::{DecodePaddingMode, Engine as _, GeneralPurpose, GeneralPurposeConfig},
};
use thiserror::Error;

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Byte length of an AES-GCM nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of the GCM authentication tag (16 bytes = 128 bits).
pub const TAG_LEN: usize = 16;

/// base64url engine for the token text form: encodes without padding,
/// accepts padded or unpadded input on decode.
const TOKEN_ENCODING: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Errors produced by the token cipher layer.
#[derive(Debug, Error)]
pub enum CipherError {
    /// The key is the wrong length (must be [`KEY_LEN`] bytes).
    #[error("invalid key length: expected {KEY_LEN} bytes")]
    InvalidKeyLength,

    /// The OS entropy source could not supply a nonce.
    #[error("system entropy source unavailable")]
    EntropyUnavailable,

    /// The token is empty, contains characters outside the base64url
    /// alphabet, or has invalid padding.
    #[error("token is not valid base64url")]
    MalformedEncoding,

    /// The decoded bytes are too short to hold a nonce and a full tag.
    #[error("token too short: needs a {NONCE_LEN}-byte nonce and {TAG_LEN}-byte tag")]
    TruncatedCiphertext,

    /// AEAD sealing or opening failed. On open this means the tag did not
    /// verify: wrong key, tampered ciphertext, or wrong nonce, with no
    /// distinction between them.
    #[error("authentication failed")]
    AuthenticationFailed,
}

/// Seal `plaintext` under `key`, returning the token text form.
///
/// A fresh random nonce is drawn per call from the OS CSPRNG and prepended
/// to the sealed bytes before encoding.
///
/// # Errors
///
/// Returns [`CipherError::InvalidKeyLength`] if `key` is not [`KEY_LEN`]
/// bytes, or [`CipherError::EntropyUnavailable`] if the nonce draw fails.
pub fn seal(plaintext: &[u8], key: &[u8]) -> Result<String, CipherError> {
    if key.len() != KEY_LEN {
        return Err(CipherError::InvalidKeyLength);
    }

    use aes_gcm::aead::rand_core::RngCore;
    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng
        .try_fill_bytes(&mut nonce_bytes)
        .map_err(|_| CipherError::EntropyUnavailable)?;

    seal_with_nonce(plaintext, key, &nonce_bytes)
}

/// Seal with an explicit nonce. Crate-private so deterministic nonces exist
/// only on test paths; production sealing always goes through [`seal`].
pub(crate) fn seal_with_nonce(
    plaintext: &[u8],
    key: &[u8],
    nonce_bytes: &[u8; NONCE_LEN],
) -> Result<String, CipherError> {
    let cipher = build_cipher(key)?;
    let nonce = Nonce::from_slice(nonce_bytes);

    let sealed = cipher
        .encrypt(nonce, plaintext)
        .map_err(|_| CipherError::AuthenticationFailed)?;

    let mut bytes = Vec::with_capacity(NONCE_LEN + sealed.len());
    bytes.extend_from_slice(nonce_bytes);
    bytes.extend_from_slice(&sealed);
    Ok(TOKEN_ENCODING.encode(bytes))
}

/// Open a token produced by [`seal`], returning the verified plaintext.
///
/// # Errors
///
/// Returns [`CipherError::MalformedEncoding`] if the token is not valid
/// base64url, [`CipherError::InvalidKeyLength`] if `key` is not [`KEY_LEN`]
/// bytes, [`CipherError::TruncatedCiphertext`] if the decoded bytes cannot
/// hold a nonce plus tag, and [`CipherError::AuthenticationFailed`] if the
/// tag does not verify.
pub fn open(token: &str, key: &[u8]) -> Result<Vec<u8>, CipherError> {
    // base64 accepts the empty string; an empty token is malformed, not
    // truncated.
    if token.is_empty() {
        return Err(CipherError::MalformedEncoding);
    }
    let decoded = TOKEN_ENCODING
        .decode(token)
        .map_err(|_| CipherError::MalformedEncoding)?;

    let cipher = build_cipher(key)?;

    if decoded.len() < NONCE_LEN + TAG_LEN {
        return Err(CipherError::TruncatedCiphertext);
    }
    let (nonce_bytes, sealed) = decoded.split_at(NONCE_LEN);
    cipher
        .decrypt(Nonce::from_slice(nonce_bytes), sealed)
        .map_err(|_| CipherError::AuthenticationFailed)
}

fn build_cipher(key: &[u8]) -> Result<Aes256Gcm, CipherError> {
    if key.len() != KEY_LEN {
        return Err(CipherError::InvalidKeyLength);
    }
    Aes256Gcm::new_from_slice(key).map_err(|_| CipherError::InvalidKeyLength)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &[u8] = b"samplekey12345678901234567890123";

    fn random_key() -> Vec<u8> {
        use aes_gcm::aead::rand_core::RngCore;
        let mut key = vec![0u8; KEY_LEN];
        OsRng.fill_bytes(&mut key);
        key
    }

    #[test]
    fn seal_open_round_trip() {
        let token = seal(b"f34135a1-2fa0-4fe3-9f79-4796e0b2c7d9", KEY).unwrap();
        let plaintext = open(&token, KEY).unwrap();
        assert_eq!(plaintext, b"f34135a1-2fa0-4fe3-9f79-4796e0b2c7d9");
    }

    #[test]
    fn fresh_nonce_per_seal() {
        let a = seal(b"same plaintext", KEY).unwrap();
        let b = seal(b"same plaintext", KEY).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn fixed_nonce_gives_stable_token() {
        let nonce = [0x24u8; NONCE_LEN];
        let a = seal_with_nonce(b"stable", KEY, &nonce).unwrap();
        let b = seal_with_nonce(b"stable", KEY, &nonce).unwrap();
        assert_eq!(a, b);
        assert_eq!(open(&a, KEY).unwrap(), b"stable");
    }

    #[test]
    fn wrong_key_fails_authentication() {
        let k1 = random_key();
        let k2 = random_key();
        let token = seal(b"secret", &k1).unwrap();
        let err = open(&token, &k2).unwrap_err();
        assert!(matches!(err, CipherError::AuthenticationFailed));
    }

    #[test]
    fn key_length_enforced_on_both_paths() {
        for len in [0usize, 8, 33] {
            let key = vec![0u8; len];
            assert!(matches!(
                seal(b"x", &key),
                Err(CipherError::InvalidKeyLength)
            ));
            assert!(matches!(
                open("AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA", &key),
                Err(CipherError::InvalidKeyLength)
            ));
        }
    }

    #[test]
    fn tampered_token_fails_authentication() {
        let token = seal(b"tamper me", KEY).unwrap();
        let decoded = TOKEN_ENCODING.decode(&token).unwrap();
        // One flipped bit in the nonce, the ciphertext, and the tag.
        for idx in [0, NONCE_LEN, decoded.len() - 1] {
            let mut bytes = decoded.clone();
            bytes[idx] ^= 0x01;
            let forged = TOKEN_ENCODING.encode(&bytes);
            assert!(matches!(
                open(&forged, KEY),
                Err(CipherError::AuthenticationFailed)
            ));
        }
    }

    #[test]
    fn truncated_token_rejected() {
        for len in [1usize, 11, NONCE_LEN, NONCE_LEN + TAG_LEN - 1] {
            let token = TOKEN_ENCODING.encode(vec![0u8; len]);
            assert!(matches!(
                open(&token, KEY),
                Err(CipherError::TruncatedCiphertext)
            ));
        }
        // Exactly nonce + tag is long enough to attempt opening; all-zero
        // bytes then fail authentication instead.
        let token = TOKEN_ENCODING.encode(vec![0u8; NONCE_LEN + TAG_LEN]);
        assert!(matches!(
            open(&token, KEY),
            Err(CipherError::AuthenticationFailed)
        ));
    }

    #[test]
    fn empty_and_garbage_tokens_rejected() {
        for bad in ["", "A", "not base64!!", "abc def", "%%%%"] {
            assert!(
                matches!(open(bad, KEY), Err(CipherError::MalformedEncoding)),
                "expected MalformedEncoding for {bad:?}"
            );
        }
    }

    #[test]
    fn decode_tolerates_padding() {
        let token = seal(b"padded", KEY).unwrap();
        let mut padded = token.clone();
        while padded.len() % 4 != 0 {
            padded.push('=');
        }
        assert_ne!(token, padded);
        assert_eq!(open(&padded, KEY).unwrap(), b"padded");
    }
}
