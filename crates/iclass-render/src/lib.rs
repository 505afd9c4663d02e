//! iClass QR rendering
//!
//! Encodes sign-in URLs as QR codes through the `qrcode` crate and renders
//! them for a terminal, as SVG, or as greyscale pixels / PNG files.
//!
//! # Error correction
//!
//! Numeric identifiers produce short URLs and use level `H`; UUID URLs are
//! longer and use level `Q` to keep the symbol scannable at small sizes.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod error;
mod export;

pub use error::RenderError;
pub use export::{export_offsets, file_name, ExportFormat, ExportedCode};

use iclass_core::IdentifierKind;
use qrcode::render::{svg, unicode};
use qrcode::{Color, EcLevel, QrCode};
use std::path::Path;

/// Modules of light border around the symbol
pub const QUIET_ZONE: usize = 4;

/// Largest pixels-per-module accepted by [`SignInQr::to_luma`]
pub const MAX_MODULE_PX: usize = 100;

/// Error-correction level used for an identifier kind
#[inline]
#[must_use]
pub fn ec_level_for(kind: IdentifierKind) -> EcLevel {
    match kind {
        IdentifierKind::Uuid => EcLevel::Q,
        IdentifierKind::Numeric => EcLevel::H,
    }
}

/// 8-bit greyscale raster, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LumaImage {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

/// An encoded sign-in QR code
pub struct SignInQr {
    url: String,
    code: QrCode,
}

impl std::fmt::Debug for SignInQr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInQr")
            .field("url", &self.url)
            .field("width", &self.code.width())
            .finish()
    }
}

impl SignInQr {
    /// Encode `url` at the level chosen for `kind`
    ///
    /// # Errors
    /// Returns [`RenderError::Encode`] if the URL does not fit in a QR code.
    pub fn encode(url: impl Into<String>, kind: IdentifierKind) -> Result<Self, RenderError> {
        let url = url.into();
        let code = QrCode::with_error_correction_level(url.as_bytes(), ec_level_for(kind))
            .map_err(|e| RenderError::Encode(e.to_string()))?;
        tracing::debug!("encoded {} as {}x{} modules", url, code.width(), code.width());
        Ok(Self { url, code })
    }

    /// Encoded text
    #[inline]
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Modules per side, excluding the quiet zone
    #[inline]
    #[must_use]
    pub fn modules(&self) -> usize {
        self.code.width()
    }

    /// Half-block rendering for a dark terminal
    #[must_use]
    pub fn to_terminal(&self) -> String {
        self.code
            .render::<unicode::Dense1x2>()
            .dark_color(unicode::Dense1x2::Light)
            .light_color(unicode::Dense1x2::Dark)
            .quiet_zone(true)
            .build()
    }

    /// SVG document at least `min_px` pixels wide
    #[must_use]
    pub fn to_svg(&self, min_px: u32) -> String {
        self.code
            .render::<svg::Color<'_>>()
            .min_dimensions(min_px, min_px)
            .dark_color(svg::Color("#000000"))
            .light_color(svg::Color("#ffffff"))
            .build()
    }

    /// Greyscale raster with `module_px` pixels per module
    ///
    /// `module_px` is clamped to `1..=MAX_MODULE_PX`.
    #[must_use]
    pub fn to_luma(&self, module_px: usize) -> LumaImage {
        let module_px = module_px.clamp(1, MAX_MODULE_PX);
        let modules = self.code.width();
        let colors = self.code.to_colors();
        let side = (modules + 2 * QUIET_ZONE) * module_px;
        let mut pixels = vec![255u8; side * side];

        for (index, color) in colors.iter().enumerate() {
            if *color != Color::Dark {
                continue;
            }
            let (mx, my) = (index % modules + QUIET_ZONE, index / modules + QUIET_ZONE);
            for y in my * module_px..(my + 1) * module_px {
                let row = y * side;
                pixels[row + mx * module_px..row + (mx + 1) * module_px].fill(0);
            }
        }

        LumaImage {
            width: side,
            height: side,
            pixels,
        }
    }

    /// Write a PNG with `module_px` pixels per module
    ///
    /// # Errors
    /// Returns [`RenderError::Image`] if the file cannot be written.
    pub fn save_png(&self, path: &Path, module_px: usize) -> Result<(), RenderError> {
        let luma = self.to_luma(module_px);
        let side = u32::try_from(luma.width).map_err(|_| RenderError::TooLarge(luma.width))?;
        let buffer = image::GrayImage::from_raw(side, side, luma.pixels)
            .ok_or(RenderError::TooLarge(luma.width))?;
        buffer
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| RenderError::image(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NUMERIC_URL: &str =
        "https://iclass.ucas.edu.cn:8181/app/course/stu_scan_sign.action?courseSchedId=1&timestamp=1";

    #[test]
    fn level_follows_kind() {
        assert_eq!(ec_level_for(IdentifierKind::Uuid), EcLevel::Q);
        assert_eq!(ec_level_for(IdentifierKind::Numeric), EcLevel::H);
    }

    #[test]
    fn luma_has_quiet_zone_and_dark_modules() {
        let qr = SignInQr::encode(NUMERIC_URL, IdentifierKind::Numeric).unwrap();
        let luma = qr.to_luma(3);
        assert_eq!(luma.width, (qr.modules() + 2 * QUIET_ZONE) * 3);
        assert_eq!(luma.pixels.len(), luma.width * luma.height);
        // Border is light, finder pattern corner is dark.
        assert_eq!(luma.pixels[0], 255);
        let corner = QUIET_ZONE * 3;
        assert_eq!(luma.pixels[corner * luma.width + corner], 0);
    }

    #[test]
    fn module_size_is_clamped() {
        let qr = SignInQr::encode(NUMERIC_URL, IdentifierKind::Numeric).unwrap();
        let huge = qr.to_luma(usize::MAX);
        assert_eq!(huge.width, (qr.modules() + 2 * QUIET_ZONE) * MAX_MODULE_PX);
        assert_eq!(qr.to_luma(0).width, qr.modules() + 2 * QUIET_ZONE);
    }

    #[test]
    fn svg_and_terminal_render() {
        let qr = SignInQr::encode(NUMERIC_URL, IdentifierKind::Numeric).unwrap();
        assert!(qr.to_svg(200).contains("<svg"));
        assert!(qr.to_terminal().lines().count() > qr.modules() / 2);
    }

    #[test]
    fn oversized_payload_fails() {
        let url = "9".repeat(8_000);
        assert!(matches!(
            SignInQr::encode(url, IdentifierKind::Numeric),
            Err(RenderError::Encode(_))
        ));
    }

    #[test]
    fn png_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("code.png");
        let qr = SignInQr::encode(NUMERIC_URL, IdentifierKind::Numeric).unwrap();
        qr.save_png(&path, 2).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
