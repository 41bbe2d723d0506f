use super::*;
use crate::storage::MemoryStore;

#[test]
fn missing_preference_follows_system() {
    let store = MemoryStore::new();
    assert_eq!(read_preference(&store, true), Theme::Dark);
    assert_eq!(read_preference(&store, false), Theme::Light);
}

#[test]
fn stored_preference_wins_over_system() {
    let store = MemoryStore::new();
    persist(&store, Theme::Light).unwrap();
    assert_eq!(store.get(keys::THEME_PREFERENCE).unwrap().as_deref(), Some("light"));
    assert_eq!(read_preference(&store, true), Theme::Light);
}

#[test]
fn unrecognized_value_falls_back() {
    let store = MemoryStore::new();
    store.set(keys::THEME_PREFERENCE, "sepia").unwrap();
    assert_eq!(read_preference(&store, true), Theme::Dark);
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn system_preference_and_apply_are_inert_natively() {
    assert!(!system_prefers_dark());
    apply(Theme::Dark);
}
