//! Application launch links
//!
//! The app is opened with two optional query parameters:
//! - `id`: prefill an identifier
//! - `share`: a share code to merge into the saved set
//!
//! Links generated here replace any existing query on the app URL.

use crate::error::LinkError;
use crate::identifier::Identifier;
use crate::saved_set::{merge_imported, MergeOutcome};
use crate::share;
use crate::types::SavedItem;
use url::Url;

/// Query parameter prefilling an identifier
pub const ID_PARAM: &str = "id";

/// Query parameter carrying a share code
pub const SHARE_PARAM: &str = "share";

/// Parameters read from a launch link
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchParams {
    /// Raw `id` value
    pub id: Option<String>,
    /// Raw `share` value
    pub share: Option<String>,
}

impl LaunchParams {
    /// Read parameters from an absolute URL
    ///
    /// # Errors
    /// Returns [`LinkError::InvalidUrl`] if `input` is not an absolute URL.
    pub fn from_url(input: &str) -> Result<Self, LinkError> {
        let url = Url::parse(input.trim()).map_err(|e| LinkError::invalid_url(input, e))?;
        Ok(Self::from_parsed(&url))
    }

    /// Read parameters from a parsed URL; the first of each wins
    #[must_use]
    pub fn from_parsed(url: &Url) -> Self {
        let mut params = Self::default();
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                ID_PARAM if params.id.is_none() => params.id = Some(value.into_owned()),
                SHARE_PARAM if params.share.is_none() => params.share = Some(value.into_owned()),
                _ => {}
            }
        }
        params
    }

    /// Normalized prefill identifier, if any survives normalization
    #[must_use]
    pub fn identifier(&self) -> Option<Identifier> {
        self.id
            .as_deref()
            .map(Identifier::normalize)
            .filter(|id| !id.is_empty())
    }

    /// Apply the link to the caller's saved set
    ///
    /// A share code that decodes to nothing leaves `existing` untouched.
    #[must_use]
    pub fn apply(&self, existing: Vec<SavedItem>) -> LaunchOutcome {
        let shared = self.share.as_deref().map(share::decode).unwrap_or_default();
        let imported = shared.len();
        let merge = if shared.is_empty() {
            MergeOutcome {
                items: existing,
                added: 0,
                skipped: 0,
            }
        } else {
            merge_imported(existing, shared)
        };
        LaunchOutcome {
            merge,
            imported,
            prefill: self.identifier(),
        }
    }
}

/// Result of applying a launch link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchOutcome {
    /// Saved set after the merge
    pub merge: MergeOutcome,
    /// Items decoded from the share code
    pub imported: usize,
    /// Identifier to show on screen
    pub prefill: Option<Identifier>,
}

impl LaunchOutcome {
    /// Whether the saved set should be persisted
    #[inline]
    #[must_use]
    pub fn changed(&self) -> bool {
        self.imported > 0
    }
}

/// Link that opens the app with `id` prefilled
#[must_use]
pub fn direct_link(app_url: &Url, id: &Identifier) -> Url {
    with_single_param(app_url, ID_PARAM, id.as_str())
}

/// Link that imports `items` when opened
///
/// The share code is form-encoded so `+`, `/` and `=` survive the trip.
#[must_use]
pub fn share_link(app_url: &Url, items: &[SavedItem]) -> Url {
    with_single_param(app_url, SHARE_PARAM, &share::encode(items))
}

/// Accept either a bare share code or a full share link
#[must_use]
pub fn extract_share_code(input: &str) -> String {
    let input = input.trim();
    match Url::parse(input) {
        Ok(url) => LaunchParams::from_parsed(&url).share.unwrap_or_default(),
        Err(_) => input.to_string(),
    }
}

fn with_single_param(app_url: &Url, key: &str, value: &str) -> Url {
    let mut url = app_url.clone();
    url.set_fragment(None);
    url.set_query(None);
    url.query_pairs_mut().append_pair(key, value);
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn app() -> Url {
        Url::parse("https://example.github.io/iclass-qrcode/?old=1#top").unwrap()
    }

    fn item(id: &str, label: &str) -> SavedItem {
        SavedItem::new(Identifier::normalize(id), label, 1)
    }

    #[test]
    fn direct_link_replaces_query() {
        let link = direct_link(&app(), &Identifier::normalize("123"));
        assert_eq!(link.as_str(), "https://example.github.io/iclass-qrcode/?id=123");
    }

    #[test]
    fn share_link_round_trips_through_url() {
        // Enough items that the code is likely to contain '+' or '/'.
        let items: Vec<_> = (0..20).map(|n| item(&n.to_string(), "课程 ~?>")).collect();
        let link = share_link(&app(), &items);
        let params = LaunchParams::from_url(link.as_str()).unwrap();
        assert_eq!(params.share.as_deref(), Some(share::encode(&items).as_str()));
        assert_eq!(share::decode(&extract_share_code(link.as_str())), items);
    }

    #[test]
    fn extract_accepts_bare_code() {
        let code = share::encode(&[item("1", "a")]);
        assert_eq!(extract_share_code(&format!("  {code}\n")), code);
    }

    #[test]
    fn params_from_url() {
        let params = LaunchParams::from_url("https://x/app?id=%2012-3&share=abc&id=9").unwrap();
        assert_eq!(params.id.as_deref(), Some(" 12-3"));
        assert_eq!(params.share.as_deref(), Some("abc"));
        assert_eq!(params.identifier().unwrap(), "123");
    }

    #[test]
    fn invalid_url_is_error() {
        assert!(matches!(
            LaunchParams::from_url("not a url"),
            Err(LinkError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn apply_merges_and_prefills() {
        let link = share_link(&app(), &[item("1", "dup"), item("2", "new")]);
        let mut params = LaunchParams::from_parsed(&link);
        params.id = Some("77".to_string());

        let outcome = params.apply(vec![item("1", "mine")]);
        assert!(outcome.changed());
        assert_eq!(outcome.imported, 2);
        assert_eq!(outcome.merge.added, 1);
        assert_eq!(outcome.merge.items.len(), 2);
        assert_eq!(outcome.prefill.unwrap(), "77");
    }

    #[test]
    fn apply_with_bad_share_changes_nothing() {
        let params = LaunchParams {
            id: Some("letters only".to_string()),
            share: Some("%%%".to_string()),
        };
        let outcome = params.apply(vec![item("1", "mine")]);
        assert!(!outcome.changed());
        assert_eq!(outcome.merge.items, vec![item("1", "mine")]);
        assert!(outcome.prefill.is_none());
    }
}
