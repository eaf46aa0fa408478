//! AES-256-GCM token sealing primitives.
//!
//! This module is free of rendering and I/O dependencies. It provides the
//! low-level seal/open operations used by the issuance layer.
//!
//! # Token format
//!
//! ```text
//! base64url-no-pad(nonce || ciphertext || tag)
//! ```
//!
//! The 12-byte nonce always leads the decoded bytes and the 16-byte tag
//! always trails them. Decoding tolerates padded input for interop with
//! encoders that emit padding.

pub mod cipher;

pub use cipher::KEY_LEN;
