use super::*;
use crate::types::{CredentialRecord, Theme};

#[test]
fn memory_store_get_set_remove() {
    let store = MemoryStore::new();
    assert!(store.is_empty());
    assert_eq!(store.get("k").unwrap(), None);

    store.set("k", "v1").unwrap();
    store.set("k", "v2").unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
    assert_eq!(store.len(), 1);

    store.remove("k").unwrap();
    store.remove("k").unwrap();
    assert_eq!(store.get("k").unwrap(), None);
}

#[test]
fn load_json_missing_key_is_none() {
    let store = MemoryStore::new();
    let loaded: Option<Vec<CredentialRecord>> = load_json(&store, keys::USERS).unwrap();
    assert!(loaded.is_none());
}

#[test]
fn save_then_load_json() {
    let store = MemoryStore::new();
    save_json(&store, keys::THEME_PREFERENCE, &Theme::Light).unwrap();
    assert_eq!(store.get(keys::THEME_PREFERENCE).unwrap().as_deref(), Some("\"light\""));
    let loaded: Option<Theme> = load_json(&store, keys::THEME_PREFERENCE).unwrap();
    assert_eq!(loaded, Some(Theme::Light));
}

#[test]
fn load_json_reports_malformed_values() {
    let store = MemoryStore::new();
    store.set(keys::USERS, "{not json").unwrap();
    let loaded: Result<Option<Vec<CredentialRecord>>, _> = load_json(&store, keys::USERS);
    assert!(matches!(loaded, Err(StorageError::Json(_))));
}
