//! QR rendering of issued tokens.
//!
//! The issuance layer hands a finished token string to a [`QrRenderer`] and
//! does not interpret rendering failures beyond surfacing them.
//! [`ImageRenderer`] is the production implementation, writing the symbol to
//! an image file.

use std::path::Path;

use image::Luma;
use qrcode::{types::QrError, EcLevel, QrCode};
use thiserror::Error;

/// Default minimum pixel dimensions of rendered symbols.
pub const DEFAULT_MIN_SIZE: u32 = 256;

/// Errors produced by the rendering layer.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The token does not fit in a QR symbol at the configured
    /// error-correction level.
    #[error("token does not fit in a QR code: {0}")]
    PayloadTooLarge(#[from] QrError),

    /// The output image could not be encoded or written to the target.
    /// Destination validation (including an empty path) lives entirely here.
    #[error("cannot write QR image: {0}")]
    DestinationUnwritable(#[from] image::ImageError),
}

/// Renders a token string to a scannable image at `target`.
#[cfg_attr(test, mockall::automock)]
pub trait QrRenderer {
    /// Draw `token` as a QR symbol and write it to `target`.
    fn render(&self, token: &str, target: &Path) -> Result<(), RenderError>;
}

/// Production renderer: medium error correction, rasterised to an image
/// file whose format is chosen from the target's extension.
#[derive(Debug, Clone)]
pub struct ImageRenderer {
    /// Minimum width and height of the output image, in pixels.
    pub min_size: u32,
}

impl ImageRenderer {
    /// Create a renderer with the given minimum pixel dimensions.
    pub fn new(min_size: u32) -> Self {
        Self { min_size }
    }
}

impl Default for ImageRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SIZE)
    }
}

impl QrRenderer for ImageRenderer {
    fn render(&self, token: &str, target: &Path) -> Result<(), RenderError> {
        let code = QrCode::with_error_correction_level(token.as_bytes(), EcLevel::M)?;
        let image = code
            .render::<Luma<u8>>()
            .min_dimensions(self.min_size, self.min_size)
            .build();
        image.save(target)?;
        Ok(())
    }
}
