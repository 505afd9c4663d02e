use iclass_core::{share, Identifier, IdentifierKind, SavedItem};
use proptest::prelude::*;

fn saved_item() -> impl Strategy<Value = SavedItem> {
    (
        prop_oneof!["[0-9 -]{0,12}", "[0-9a-fA-F]{32}", "\\PC{0,16}"],
        "\\PC{0,24}",
        any::<i64>(),
    )
        .prop_map(|(id, label, timestamp)| SavedItem::new(Identifier::normalize(&id), label, timestamp))
}

proptest! {
    #[test]
    fn prop_normalize_is_idempotent(raw in "\\PC{0,64}") {
        let once = Identifier::normalize(&raw);
        let twice = Identifier::normalize(once.as_str());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_hex32_normalizes_to_uppercase(raw in "[0-9a-fA-F]{32}") {
        let id = Identifier::normalize(&raw);
        prop_assert_eq!(id.as_str(), raw.to_uppercase());
        prop_assert_eq!(id.kind(), IdentifierKind::Uuid);
    }

    #[test]
    fn prop_otherwise_keeps_digits_in_order(raw in "[a-z0-9 .:/-]{1,40}") {
        prop_assume!(raw.chars().any(|c| c.is_ascii_digit()));
        let upper = raw.trim().to_uppercase();
        prop_assume!(!(upper.len() == 32 && upper.chars().all(|c| c.is_ascii_hexdigit())));

        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        let normalized = Identifier::normalize(&raw);
        prop_assert_eq!(normalized.as_str(), digits);
    }

    #[test]
    fn prop_share_round_trip_modulo_normalization(items in prop::collection::vec(saved_item(), 0..8)) {
        let expected: Vec<SavedItem> = items
            .iter()
            .map(|item| SavedItem::new(
                Identifier::normalize(item.id.as_str()),
                item.label.trim(),
                item.timestamp,
            ))
            .filter(|item| !item.id.is_empty() && !item.label.is_empty())
            .collect();

        prop_assert_eq!(share::decode(&share::encode(&items)), expected);
    }

    #[test]
    fn prop_decode_never_panics(code in "\\PC{0,200}") {
        let _ = share::decode(&code);
    }
}
