use std::path::PathBuf;

/// Errors while encoding or writing QR codes
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Payload rejected by the encoder
    #[error("cannot encode QR code: {0}")]
    Encode(String),

    /// Raster side does not fit an image buffer
    #[error("image too large: {0}px")]
    TooLarge(usize),

    /// Image file could not be written
    #[error("cannot write image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// SVG file or export directory could not be written
    #[error("io error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RenderError {
    /// Create image error for path
    pub fn image(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::Image {
            path: path.into(),
            source,
        }
    }

    /// Create IO error for path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
