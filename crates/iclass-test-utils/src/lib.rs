//! Testing utilities for iClass QR workspace
//!
//! Shared fixtures: pinned clocks, sample saved items and rendered QR rasters.

#![allow(missing_docs)]

use iclass_core::{FixedClock, Identifier, IdentifierKind, SavedItem, SignInUrlBuilder};
use iclass_render::SignInQr;

pub use iclass_render::LumaImage;

/// 2024-01-01T00:00:00Z
pub const FIXED_NOW_MS: i64 = 1_704_067_200_000;

pub const NUMERIC_ID: &str = "12345";

pub const UUID_ID: &str = "ABCDEF0123456789ABCDEF0123456789";

pub fn fixed_clock() -> FixedClock {
    FixedClock::at(FIXED_NOW_MS)
}

pub fn fixed_builder() -> SignInUrlBuilder<FixedClock> {
    SignInUrlBuilder::with_clock(fixed_clock())
}

pub fn saved_item(id: &str, label: &str) -> SavedItem {
    SavedItem::new(Identifier::normalize(id), label, FIXED_NOW_MS)
}

/// One numeric, one UUID and one CJK-labelled item
pub fn sample_items() -> Vec<SavedItem> {
    vec![
        saved_item(NUMERIC_ID, "Physics"),
        saved_item(UUID_ID, "Compilers"),
        saved_item("880021", "高等数学"),
    ]
}

/// Greyscale raster of a QR code carrying `text`
pub fn qr_raster(text: &str, kind: IdentifierKind) -> LumaImage {
    SignInQr::encode(text, kind)
        .expect("fixture payload fits in a QR code")
        .to_luma(4)
}

/// Raster of the sign-in code for `id` at the fixed time
pub fn sign_in_raster(id: &str) -> LumaImage {
    let id = Identifier::normalize(id);
    qr_raster(&fixed_builder().build(&id, 0), id.kind())
}
