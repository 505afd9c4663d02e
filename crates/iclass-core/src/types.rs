//! Saved course items and the share payload shape

use crate::identifier::Identifier;
use serde::{Deserialize, Serialize};

/// A labelled course identifier kept by the user
///
/// Field order matches the persisted and shared JSON:
/// `{"id": "...", "label": "...", "timestamp": 0}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SavedItem {
    /// Canonical identifier
    pub id: Identifier,
    /// Display name
    pub label: String,
    /// Creation time in epoch milliseconds (metadata only)
    pub timestamp: i64,
}

impl SavedItem {
    /// Create new item
    #[inline]
    #[must_use]
    pub fn new(id: Identifier, label: impl Into<String>, timestamp: i64) -> Self {
        Self {
            id,
            label: label.into(),
            timestamp,
        }
    }
}

/// Logical share payload before encoding
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShareData {
    pub items: Vec<SavedItem>,
}

impl ShareData {
    #[inline]
    #[must_use]
    pub fn new(items: Vec<SavedItem>) -> Self {
        Self { items }
    }
}

impl From<Vec<SavedItem>> for ShareData {
    fn from(items: Vec<SavedItem>) -> Self {
        Self { items }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_field_order() {
        let item = SavedItem::new(Identifier::normalize("42"), "Physics", 7);
        let json = serde_json::to_string(&ShareData::new(vec![item])).unwrap();
        assert_eq!(json, r#"{"items":[{"id":"42","label":"Physics","timestamp":7}]}"#);
    }
}
