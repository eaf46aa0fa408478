//! Configuration loading and validation for the qrpass binary.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Validated qrpass configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Symmetric key passes are sealed under. Must be exactly 32 bytes.
    /// **Required.**
    pub key: String,

    /// Where the rendered QR image is written. Not validated here; the
    /// renderer owns destination errors.
    #[serde(default = "default_output_path")]
    pub output_path: String,

    /// Category tag embedded in the issued payload.
    #[serde(default = "default_kind")]
    pub kind: String,

    /// Minimum pixel dimensions of the rendered QR image.
    #[serde(default = "default_qr_size")]
    pub qr_size: u32,

    /// Tracing log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_output_path() -> String {
    "encrypted_qr.png".into()
}
fn default_kind() -> String {
    "access".into()
}
fn default_qr_size() -> u32 {
    256
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or cannot be
    /// parsed.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build qrpass configuration")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise qrpass configuration")?;

        c.validate()?;
        Ok(c)
    }

    fn validate(&self) -> Result<()> {
        if self.key.len() != issuer::KEY_LEN {
            anyhow::bail!(
                "KEY must be exactly {} bytes, got {}",
                issuer::KEY_LEN,
                self.key.len()
            );
        }
        if self.qr_size == 0 {
            anyhow::bail!("QR_SIZE must be > 0");
        }
        Ok(())
    }
}
