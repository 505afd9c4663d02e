//! Identifier extraction from decoded QR payloads
//!
//! Sign-in QR codes carry a full URL; older printed codes carry the bare
//! identifier. Both are accepted.

use url::Url;

/// Query parameters recognized in a payload URL, in priority order
pub const IDENTIFIER_PARAMS: [&str; 2] = ["courseSchedId", "timeTableId"];

/// Pull the identifier out of a decoded payload
///
/// - A URL yields the first present of `courseSchedId`, `timeTableId`,
///   even when its value is empty
/// - Anything that is not a URL is returned as-is
/// - A URL with neither parameter, or an empty payload, yields `None`
///
/// The result is not normalized.
#[must_use]
pub fn extract_identifier(payload: &str) -> Option<String> {
    match Url::parse(payload.trim()) {
        Ok(url) => IDENTIFIER_PARAMS.iter().find_map(|param| {
            url.query_pairs()
                .find(|(key, _)| key == param)
                .map(|(_, value)| value.into_owned())
        }),
        Err(_) if payload.is_empty() => None,
        Err(_) => Some(payload.to_string()),
    }
}
