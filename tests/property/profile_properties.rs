// Property-based tests for the theme profile store
// Random profiles go in; ids, order and counts must come back consistent

use overlay_themes::models::theme_profile::ThemeProfile;
use overlay_themes::{Database, ThemeProfileStore};
use proptest::prelude::*;

fn arb_profile() -> impl Strategy<Value = ThemeProfile> {
    (
        "[A-Za-z][A-Za-z0-9 ]{0,20}",
        prop::bool::ANY,
        1..=6u8,
        "[a-z.]{0,30}",
        "[a-z./]{0,30}",
    )
        .prop_map(|(name, night, switch, font, wallpaper)| ThemeProfile {
            day_or_night: if night { "night" } else { "day" }.to_string(),
            theme_switch: switch.to_string(),
            font,
            wallpaper,
            ..ThemeProfile::new(name)
        })
}

proptest! {
    /// Property: profiles come back in insertion order with increasing ids
    #[test]
    fn prop_get_all_preserves_insertion_order(
        profiles in prop::collection::vec(arb_profile(), 0..=10)
    ) {
        let db = Database::open(":memory:").unwrap();
        let store = ThemeProfileStore::new(db.connection());

        let ids: Vec<i64> = profiles.iter().map(|p| store.insert(p).unwrap()).collect();
        prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));

        let stored = store.get_all().unwrap();
        prop_assert_eq!(stored.len(), profiles.len());
        for ((stored, original), id) in stored.iter().zip(&profiles).zip(&ids) {
            prop_assert_eq!(stored, &original.clone().with_id(*id));
        }
    }

    /// Property: count tracks inserts and deletes
    #[test]
    fn prop_count_tracks_deletes(
        profiles in prop::collection::vec(arb_profile(), 1..=10),
        delete_mask in prop::collection::vec(prop::bool::ANY, 10)
    ) {
        let db = Database::open(":memory:").unwrap();
        let store = ThemeProfileStore::new(db.connection());
        let ids: Vec<i64> = profiles.iter().map(|p| store.insert(p).unwrap()).collect();

        let mut remaining = ids.len();
        for (id, delete) in ids.iter().zip(&delete_mask) {
            if *delete {
                store.delete(*id).unwrap();
                remaining -= 1;
                prop_assert!(store.get_by_id(*id).unwrap_err().is_not_found());
            }
        }
        prop_assert_eq!(store.count().unwrap(), remaining);
    }

    /// Property: ids are never reused after a delete
    #[test]
    fn prop_ids_not_reused(profile in arb_profile()) {
        let db = Database::open(":memory:").unwrap();
        let store = ThemeProfileStore::new(db.connection());

        let first = store.insert(&profile).unwrap();
        store.delete(first).unwrap();
        let second = store.insert(&profile).unwrap();
        prop_assert!(second > first);
    }
}
