//! Share codes for exchanging saved items
//!
//! A share code is standard base64 over the UTF-8 bytes of
//! `{"items":[{"id":..,"label":..,"timestamp":..}]}`. Working on the UTF-8
//! bytes keeps every code point (CJK labels included) intact through the
//! byte-oriented base64 step, and produces the same text as escaping the
//! JSON to `%XX` sequences and mapping each escape to one byte.
//!
//! [`decode`] is fed straight from URL parameters written by other users, so
//! it never fails: anything malformed imports nothing.

use crate::error::ShareError;
use crate::identifier::Identifier;
use crate::types::SavedItem;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use serde::Serialize;
use serde_json::Value;

/// Standard alphabet; padding written on encode. Decoding accepts missing
/// padding and non-zero trailing bits, as browser `atob` does.
const SHARE_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

#[derive(Serialize)]
struct ShareDataRef<'a> {
    items: &'a [SavedItem],
}

/// Encode items into a printable share code
///
/// The result may contain `+`, `/` and `=`; escaping them for a URL is the
/// caller's job (see [`crate::link::share_link`]).
#[must_use]
pub fn encode(items: &[SavedItem]) -> String {
    match serde_json::to_string(&ShareDataRef { items }) {
        Ok(json) => SHARE_ENGINE.encode(json.as_bytes()),
        Err(e) => {
            tracing::error!("share encode failed: {}", e);
            String::new()
        }
    }
}

/// Decode a share code, returning nothing on any malformed input
///
/// Identifiers are re-normalized and labels trimmed; items left with an
/// empty id or label are dropped. Order is preserved.
#[must_use]
pub fn decode(code: &str) -> Vec<SavedItem> {
    match try_decode(code) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!("share decode failed: {}", e);
            Vec::new()
        }
    }
}

/// Decode a share code, reporting why it was rejected
///
/// Whitespace inside the code is ignored. A single element with the wrong
/// shape rejects the whole payload.
///
/// # Errors
/// Returns [`ShareError`] for bad base64, bad UTF-8, bad JSON, a missing
/// `items` array, or an element with a mistyped field.
pub fn try_decode(code: &str) -> Result<Vec<SavedItem>, ShareError> {
    let compact: String = code.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = SHARE_ENGINE.decode(compact.as_bytes())?;
    let json = String::from_utf8(bytes)?;
    let root: Value = serde_json::from_str(&json)?;

    let elements = root
        .get("items")
        .and_then(Value::as_array)
        .ok_or(ShareError::MissingItems)?;

    let validated = elements
        .iter()
        .enumerate()
        .map(|(index, element)| validate_item(index, element))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(validated
        .into_iter()
        .map(|(id, label, timestamp)| {
            SavedItem::new(Identifier::normalize(id), label.trim(), timestamp)
        })
        .filter(|item| !item.id.is_empty() && !item.label.is_empty())
        .collect())
}

fn validate_item(index: usize, element: &Value) -> Result<(&str, &str, i64), ShareError> {
    let invalid = |field| ShareError::InvalidItem { index, field };

    let id = element.get("id").and_then(Value::as_str).ok_or(invalid("id"))?;
    let label = element
        .get("label")
        .and_then(Value::as_str)
        .ok_or(invalid("label"))?;
    let timestamp = element
        .get("timestamp")
        .and_then(json_millis)
        .ok_or(invalid("timestamp"))?;

    Ok((id, label, timestamp))
}

#[allow(clippy::cast_possible_truncation)]
fn json_millis(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| value.as_f64().map(|f| f as i64))
}
