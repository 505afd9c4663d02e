//! Time-offset export
//!
//! Writes one image per offset so a code can be shown a little later than
//! it was generated (for example `+30s` while walking into the room).

use crate::error::RenderError;
use crate::SignInQr;
use iclass_core::{Clock, Identifier, SignInUrlBuilder};
use std::path::{Path, PathBuf};

/// Pixel size of exported SVG files
const SVG_PX: u32 = 500;

/// Output image format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Png,
    Svg,
}

impl ExportFormat {
    #[inline]
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}

/// One written file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedCode {
    pub offset_seconds: i64,
    pub url: String,
    pub path: PathBuf,
}

/// `iclass_<id>_<offset>s.<ext>`
#[must_use]
pub fn file_name(id: &Identifier, offset_seconds: i64, format: ExportFormat) -> String {
    format!("iclass_{}_{}s.{}", id, offset_seconds, format.extension())
}

/// Render and write one code per offset into `dir`
///
/// Every URL is built from the same clock reading plus its offset.
///
/// # Errors
/// Returns [`RenderError`] on the first code that cannot be encoded or
/// written; files already written are kept.
pub fn export_offsets<C: Clock>(
    builder: &SignInUrlBuilder<C>,
    id: &Identifier,
    offsets: &[i64],
    dir: &Path,
    format: ExportFormat,
    module_px: usize,
) -> Result<Vec<ExportedCode>, RenderError> {
    std::fs::create_dir_all(dir).map_err(|e| RenderError::io(dir, e))?;

    let frozen = SignInUrlBuilder::with_clock(iclass_core::FixedClock::at(
        builder.clock().now_millis(),
    ));

    let mut written = Vec::with_capacity(offsets.len());
    for &offset in offsets {
        let url = frozen.build(id, offset);
        let qr = SignInQr::encode(url.clone(), id.kind())?;
        let path = dir.join(file_name(id, offset, format));
        match format {
            ExportFormat::Png => qr.save_png(&path, module_px)?,
            ExportFormat::Svg => std::fs::write(&path, qr.to_svg(SVG_PX))
                .map_err(|e| RenderError::io(&path, e))?,
        }
        tracing::info!("exported {} (+{}s)", path.display(), offset);
        written.push(ExportedCode {
            offset_seconds: offset,
            url,
            path,
        });
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use iclass_core::FixedClock;
    use pretty_assertions::assert_eq;

    #[test]
    fn file_names() {
        let id = Identifier::normalize("123");
        assert_eq!(file_name(&id, 30, ExportFormat::Png), "iclass_123_30s.png");
        assert_eq!(file_name(&id, 0, ExportFormat::Svg), "iclass_123_0s.svg");
    }

    #[test]
    fn exports_one_file_per_offset() {
        let dir = tempfile::tempdir().unwrap();
        let builder = SignInUrlBuilder::with_clock(FixedClock::at(1_000));
        let id = Identifier::normalize("123");

        let written =
            export_offsets(&builder, &id, &[0, 5, 60], dir.path(), ExportFormat::Svg, 4).unwrap();

        let offsets: Vec<_> = written.iter().map(|w| w.offset_seconds).collect();
        assert_eq!(offsets, vec![0, 5, 60]);
        assert!(written[2].url.ends_with("timestamp=61000"));
        for code in &written {
            let svg = std::fs::read_to_string(&code.path).unwrap();
            assert!(svg.contains("<svg"));
        }
    }
}
