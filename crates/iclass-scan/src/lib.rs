//! iClass QR image scanning
//!
//! Turns a photo or screenshot of a sign-in QR code back into a course
//! identifier.
//!
//! # Example
//!
//! ```rust,ignore
//! use iclass_scan::{decode_identifier_from_image, ImageSource, RqrrDecoder};
//!
//! let outcome = decode_identifier_from_image(&RqrrDecoder::new(), &ImageSource::path("qr.png")).await;
//! if let Some(id) = outcome.identifier() {
//!     println!("{id}");
//! }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod decoder;
pub mod error;
pub mod extract;

pub use decoder::{DecodedPayload, ImageSource, QrDecoder, RqrrDecoder};
pub use error::ScanError;
pub use extract::{extract_identifier, IDENTIFIER_PARAMS};

use iclass_core::Identifier;

/// Result of scanning an image for an identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Raw identifier text, not yet normalized
    Found(String),
    /// No code, unreadable image, or a code without an identifier
    NotFound,
}

impl ScanOutcome {
    #[inline]
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Raw text, if found
    #[inline]
    #[must_use]
    pub fn into_raw(self) -> Option<String> {
        match self {
            Self::Found(raw) => Some(raw),
            Self::NotFound => None,
        }
    }

    /// Normalized identifier, if found and non-empty after normalization
    #[must_use]
    pub fn identifier(&self) -> Option<Identifier> {
        match self {
            Self::Found(raw) => Some(Identifier::normalize(raw)).filter(|id| !id.is_empty()),
            Self::NotFound => None,
        }
    }
}

/// Decode an identifier from an image through `decoder`
///
/// Never fails: decoder errors are logged and reported as
/// [`ScanOutcome::NotFound`]. Holds no state across the await, so dropping
/// the future is a complete cancellation.
pub async fn decode_identifier_from_image<D>(decoder: &D, image: &ImageSource) -> ScanOutcome
where
    D: QrDecoder + ?Sized,
{
    let payload = match decoder.decode(image).await {
        Ok(Some(payload)) => payload,
        Ok(None) => {
            tracing::info!("no QR code found in {}", image.describe());
            return ScanOutcome::NotFound;
        }
        Err(e) => {
            tracing::warn!("QR scan failed: {}", e);
            return ScanOutcome::NotFound;
        }
    };

    tracing::debug!(
        "decoded payload {:?} (version {:?}, ecc {:?})",
        payload.text,
        payload.version,
        payload.ecc_level
    );

    match extract_identifier(&payload.text) {
        Some(raw) => ScanOutcome::Found(raw),
        None => {
            tracing::info!("QR payload carries no identifier");
            ScanOutcome::NotFound
        }
    }
}
