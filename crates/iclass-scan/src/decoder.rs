//! Image decoding capability
//!
//! [`QrDecoder`] is the seam to the third-party scanner: given an image it
//! produces zero or one decoded text payload. [`RqrrDecoder`] backs it with
//! the `rqrr` crate; tests substitute their own implementation.

use crate::error::ScanError;
use std::path::PathBuf;

/// Image handed to a decoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Image file on disk (PNG or JPEG)
    Path(PathBuf),
    /// Encoded image file contents
    Bytes(Vec<u8>),
    /// 8-bit greyscale pixels, row-major
    Luma {
        width: usize,
        height: usize,
        pixels: Vec<u8>,
    },
}

impl ImageSource {
    /// Image file source
    #[inline]
    #[must_use]
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    /// Short description for logs
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Path(path) => path.display().to_string(),
            Self::Bytes(bytes) => format!("<{} bytes>", bytes.len()),
            Self::Luma { width, height, .. } => format!("<{width}x{height} pixels>"),
        }
    }
}

/// Text decoded from a QR code, with symbol metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPayload {
    /// Decoded text
    pub text: String,
    /// QR version (1-40), when known
    pub version: Option<usize>,
    /// Error-correction level code, when known
    pub ecc_level: Option<u16>,
}

impl DecodedPayload {
    /// Payload without metadata
    #[inline]
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            version: None,
            ecc_level: None,
        }
    }
}

/// Decode capability supplied by the environment
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait QrDecoder: Send + Sync {
    /// Decode at most one payload from `image`
    ///
    /// `Ok(None)` means the image was read but held no readable code.
    async fn decode(&self, image: &ImageSource) -> Result<Option<DecodedPayload>, ScanError>;
}

/// Decoder backed by `rqrr`
///
/// Scanning is CPU-bound and runs on the blocking pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct RqrrDecoder;

impl RqrrDecoder {
    /// Create new decoder
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Decode synchronously on the current thread
    ///
    /// # Errors
    /// Returns [`ScanError`] if the image cannot be read.
    pub fn decode_blocking(image: &ImageSource) -> Result<Option<DecodedPayload>, ScanError> {
        let (width, height, pixels) = load_luma(image)?;
        let mut prepared =
            rqrr::PreparedImage::prepare_from_greyscale(width, height, |x, y| pixels[y * width + x]);

        let grids = prepared.detect_grids();
        tracing::debug!("found {} candidate grids in {}", grids.len(), image.describe());

        for grid in grids {
            match grid.decode() {
                Ok((meta, text)) => {
                    return Ok(Some(DecodedPayload {
                        text,
                        version: Some(meta.version.0),
                        ecc_level: Some(meta.ecc_level),
                    }));
                }
                Err(e) => tracing::debug!("grid rejected: {}", e),
            }
        }
        Ok(None)
    }
}

#[async_trait::async_trait]
impl QrDecoder for RqrrDecoder {
    async fn decode(&self, image: &ImageSource) -> Result<Option<DecodedPayload>, ScanError> {
        let image = image.clone();
        tokio::task::spawn_blocking(move || Self::decode_blocking(&image))
            .await
            .map_err(|e| ScanError::Task(e.to_string()))?
    }
}

fn load_luma(image: &ImageSource) -> Result<(usize, usize, Vec<u8>), ScanError> {
    let luma = match image {
        ImageSource::Path(path) => image::open(path)
            .map_err(|e| ScanError::image(path, e))?
            .to_luma8(),
        ImageSource::Bytes(bytes) => image::load_from_memory(bytes)?.to_luma8(),
        ImageSource::Luma {
            width,
            height,
            pixels,
        } => {
            let expected = width.checked_mul(*height).ok_or(ScanError::InvalidBuffer {
                expected: usize::MAX,
                actual: pixels.len(),
            })?;
            if pixels.len() != expected {
                return Err(ScanError::InvalidBuffer {
                    expected,
                    actual: pixels.len(),
                });
            }
            return Ok((*width, *height, pixels.clone()));
        }
    };
    let (width, height) = (luma.width() as usize, luma.height() as usize);
    Ok((width, height, luma.into_raw()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatched_buffer_is_rejected() {
        let image = ImageSource::Luma {
            width: 4,
            height: 4,
            pixels: vec![0; 15],
        };
        assert!(matches!(
            RqrrDecoder::decode_blocking(&image),
            Err(ScanError::InvalidBuffer {
                expected: 16,
                actual: 15
            })
        ));
    }

    #[test]
    fn overflowing_dimensions_are_rejected() {
        let image = ImageSource::Luma {
            width: usize::MAX,
            height: 2,
            pixels: Vec::new(),
        };
        assert!(matches!(
            RqrrDecoder::decode_blocking(&image),
            Err(ScanError::InvalidBuffer { actual: 0, .. })
        ));
    }

    #[tokio::test]
    async fn overflowing_dimensions_are_not_found() {
        let image = ImageSource::Luma {
            width: 1 << (usize::BITS - 1),
            height: 2,
            pixels: Vec::new(),
        };
        let outcome = crate::decode_identifier_from_image(&RqrrDecoder::new(), &image).await;
        assert_eq!(outcome, crate::ScanOutcome::NotFound);
    }

    #[test]
    fn blank_image_has_no_code() {
        let image = ImageSource::Luma {
            width: 64,
            height: 64,
            pixels: vec![255; 64 * 64],
        };
        assert_eq!(RqrrDecoder::decode_blocking(&image).unwrap(), None);
    }

    #[test]
    fn garbage_bytes_are_an_error() {
        let image = ImageSource::Bytes(b"definitely not a png".to_vec());
        assert!(matches!(
            RqrrDecoder::decode_blocking(&image),
            Err(ScanError::ImageBytes(_))
        ));
    }

    #[test]
    fn describe_sources() {
        assert_eq!(ImageSource::path("a.png").describe(), "a.png");
        assert_eq!(ImageSource::Bytes(vec![1, 2]).describe(), "<2 bytes>");
    }
}
