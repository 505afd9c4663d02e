//! Operations over the user's saved items
//!
//! The collection is owned by the caller: every operation takes it by value
//! and hands back the updated sequence. Insertion order is display order.
//!
//! Duplicate policy depends on the entry point:
//! - [`save_current`] rejects an id that is already saved
//! - [`merge_imported`] silently skips ids that are already saved
//! - [`add_item`] does not check

use crate::error::SavedSetError;
use crate::identifier::Identifier;
use crate::types::SavedItem;

/// Check whether `id` is already saved
#[inline]
#[must_use]
pub fn contains_id(items: &[SavedItem], id: &Identifier) -> bool {
    items.iter().any(|item| &item.id == id)
}

/// First saved item with `id`
#[inline]
#[must_use]
pub fn find_by_id<'a>(items: &'a [SavedItem], id: &Identifier) -> Option<&'a SavedItem> {
    items.iter().find(|item| &item.id == id)
}

/// Save the identifier currently on screen, appending it
///
/// # Errors
/// - [`SavedSetError::Identifier`] if `id` is empty
/// - [`SavedSetError::EmptyLabel`] if `label` is blank
/// - [`SavedSetError::AlreadySaved`] if `id` is already in `items`
pub fn save_current(
    mut items: Vec<SavedItem>,
    id: &Identifier,
    label: &str,
    now_millis: i64,
) -> Result<Vec<SavedItem>, SavedSetError> {
    let id = Identifier::parse_non_empty(id.as_str())?;
    if contains_id(&items, &id) {
        return Err(SavedSetError::AlreadySaved(id.into_string()));
    }
    let label = non_empty_label(label)?;
    items.push(SavedItem::new(id, label, now_millis));
    Ok(items)
}

/// Add a new item from the management view, prepending it
///
/// # Errors
/// - [`SavedSetError::Identifier`] if `raw_id` normalizes to nothing
/// - [`SavedSetError::EmptyLabel`] if `label` is blank
pub fn add_item(
    mut items: Vec<SavedItem>,
    raw_id: &str,
    label: &str,
    now_millis: i64,
) -> Result<Vec<SavedItem>, SavedSetError> {
    let id = Identifier::parse_non_empty(raw_id)?;
    let label = non_empty_label(label)?;
    items.insert(0, SavedItem::new(id, label, now_millis));
    Ok(items)
}

/// Replace the label at `index`
///
/// The label is stored as typed; blank labels are allowed while editing.
///
/// # Errors
/// Returns [`SavedSetError::IndexOutOfRange`] for a bad index.
pub fn edit_label(
    mut items: Vec<SavedItem>,
    index: usize,
    label: &str,
) -> Result<Vec<SavedItem>, SavedSetError> {
    let len = items.len();
    let item = items
        .get_mut(index)
        .ok_or(SavedSetError::IndexOutOfRange { index, len })?;
    item.label = label.to_string();
    Ok(items)
}

/// Replace the identifier at `index` with the normalized `raw_id`
///
/// # Errors
/// Returns [`SavedSetError::IndexOutOfRange`] for a bad index.
pub fn edit_id(
    mut items: Vec<SavedItem>,
    index: usize,
    raw_id: &str,
) -> Result<Vec<SavedItem>, SavedSetError> {
    let len = items.len();
    let item = items
        .get_mut(index)
        .ok_or(SavedSetError::IndexOutOfRange { index, len })?;
    item.id = Identifier::normalize(raw_id);
    Ok(items)
}

/// Remove the item at `index`
///
/// # Errors
/// Returns [`SavedSetError::IndexOutOfRange`] for a bad index.
pub fn remove(mut items: Vec<SavedItem>, index: usize) -> Result<Vec<SavedItem>, SavedSetError> {
    if index >= items.len() {
        return Err(SavedSetError::IndexOutOfRange {
            index,
            len: items.len(),
        });
    }
    items.remove(index);
    Ok(items)
}

/// Result of merging imported items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Existing items followed by the newly added ones
    pub items: Vec<SavedItem>,
    /// How many imported items were added
    pub added: usize,
    /// How many imported items were skipped as duplicates
    pub skipped: usize,
}

/// Append imported items whose id is not already present
///
/// Duplicates within `imported` itself are also collapsed to the first.
#[must_use]
pub fn merge_imported(existing: Vec<SavedItem>, imported: Vec<SavedItem>) -> MergeOutcome {
    let mut items = existing;
    let mut added = 0;
    let mut skipped = 0;
    for item in imported {
        if contains_id(&items, &item.id) {
            skipped += 1;
        } else {
            items.push(item);
            added += 1;
        }
    }
    tracing::debug!("merged import: {} added, {} skipped", added, skipped);
    MergeOutcome {
        items,
        added,
        skipped,
    }
}

fn non_empty_label(label: &str) -> Result<&str, SavedSetError> {
    let label = label.trim();
    if label.is_empty() {
        Err(SavedSetError::EmptyLabel)
    } else {
        Ok(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn item(id: &str, label: &str) -> SavedItem {
        SavedItem::new(Identifier::normalize(id), label, 0)
    }

    fn ids(items: &[SavedItem]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn save_current_appends() {
        let items = save_current(vec![item("1", "a")], &Identifier::normalize("2"), " b ", 9).unwrap();
        assert_eq!(ids(&items), vec!["1", "2"]);
        assert_eq!(items[1].label, "b");
        assert_eq!(items[1].timestamp, 9);
    }

    #[test]
    fn save_current_rejects_duplicate() {
        let err = save_current(vec![item("1", "a")], &Identifier::normalize("1"), "b", 0).unwrap_err();
        assert!(err.is_duplicate());
    }

    #[test]
    fn save_current_rejects_blank() {
        let err = save_current(Vec::new(), &Identifier::default(), "b", 0).unwrap_err();
        assert!(matches!(err, SavedSetError::Identifier(_)));
        let err = save_current(Vec::new(), &Identifier::normalize("1"), "  ", 0).unwrap_err();
        assert!(matches!(err, SavedSetError::EmptyLabel));
    }

    #[test]
    fn add_item_prepends_without_duplicate_check() {
        let items = add_item(vec![item("1", "a")], "id: 1", "again", 0).unwrap();
        assert_eq!(ids(&items), vec!["1", "1"]);
        assert_eq!(items[0].label, "again");
    }

    #[test]
    fn edits_normalize_id() {
        let items = edit_id(vec![item("1", "a")], 0, " 4-2 ").unwrap();
        assert_eq!(ids(&items), vec!["42"]);
        let items = edit_label(items, 0, "renamed").unwrap();
        assert_eq!(items[0].label, "renamed");
    }

    #[test]
    fn out_of_range_index() {
        assert!(matches!(
            remove(vec![item("1", "a")], 1),
            Err(SavedSetError::IndexOutOfRange { index: 1, len: 1 })
        ));
        assert!(edit_label(Vec::new(), 0, "x").is_err());
        assert!(edit_id(Vec::new(), 0, "1").is_err());
    }

    #[test]
    fn remove_keeps_order() {
        let items = remove(vec![item("1", "a"), item("2", "b"), item("3", "c")], 1).unwrap();
        assert_eq!(ids(&items), vec!["1", "3"]);
    }

    #[test]
    fn merge_skips_existing_and_repeated() {
        let outcome = merge_imported(
            vec![item("1", "mine")],
            vec![item("1", "theirs"), item("2", "b"), item("2", "b again")],
        );
        assert_eq!(ids(&outcome.items), vec!["1", "2"]);
        assert_eq!(outcome.items[0].label, "mine");
        assert_eq!(outcome.added, 1);
        assert_eq!(outcome.skipped, 2);
    }

    #[test]
    fn lookups() {
        let items = vec![item("1", "a"), item("2", "b")];
        assert!(contains_id(&items, &Identifier::normalize("2")));
        assert_eq!(find_by_id(&items, &Identifier::normalize("2")).unwrap().label, "b");
        assert!(find_by_id(&items, &Identifier::normalize("3")).is_none());
    }
}
