//! `qrpass` — demo binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise structured JSON logging.
//! 3. Issue one pass and render it to the configured image file.
//! 4. Validate the freshly issued token and print it to stdout.

mod config;
mod telemetry;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use config::Config;
use issuer::ImageRenderer;

fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: qrpass configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;

    // -----------------------------------------------------------------------
    // 3. Issue and render
    // -----------------------------------------------------------------------
    let renderer = ImageRenderer::new(cfg.qr_size);
    let issued = issuer::issue_to(
        cfg.key.as_bytes(),
        &cfg.kind,
        &renderer,
        Path::new(&cfg.output_path),
    )
    .context("failed to issue pass")?;
    info!(
        identifier = %issued.payload.identifier,
        kind = %issued.payload.kind,
        output = %cfg.output_path,
        "pass issued"
    );

    // -----------------------------------------------------------------------
    // 4. Validate the round trip
    // -----------------------------------------------------------------------
    let payload = issuer::validate(&issued.token, cfg.key.as_bytes())
        .context("freshly issued token failed validation")?;
    info!(
        identifier = %payload.identifier,
        issued_at = payload.issued_at,
        "pass validated"
    );

    println!("{}", issued.token);
    Ok(())
}
