//! Payload types shared across `qrpass` crates.

pub mod payload;

pub use payload::{PayloadError, TokenPayload};
