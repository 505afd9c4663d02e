//! Error types for QR image decoding

use std::path::PathBuf;

/// Errors raised while reading or scanning an image
///
/// [`crate::decode_identifier_from_image`] turns all of these into
/// [`crate::ScanOutcome::NotFound`]; they surface only when a
/// [`crate::QrDecoder`] is called directly.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Image file could not be read or decoded
    #[error("cannot read image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// In-memory image bytes could not be decoded
    #[error("cannot decode image bytes: {0}")]
    ImageBytes(#[from] image::ImageError),

    /// Pixel buffer does not match its dimensions
    #[error("pixel buffer has {actual} bytes, expected {expected}")]
    InvalidBuffer { expected: usize, actual: usize },

    /// Background scan task failed
    #[error("scan task failed: {0}")]
    Task(String),
}

impl ScanError {
    /// Create image error for path
    pub fn image(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::Image {
            path: path.into(),
            source,
        }
    }
}
