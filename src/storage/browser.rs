//! Browser `localStorage` backend.
//!
//! The `Storage` handle is looked up on every call rather than held, which
//! keeps this type `Send + Sync` for sharing behind an `Arc` and matches how
//! the rest of the hydrate code reaches for `window()` on demand.

use super::{KeyValueStore, StorageError};

#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

fn storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .ok_or_else(|| StorageError::Unavailable("no window".to_owned()))?
        .local_storage()
        .map_err(|_| StorageError::Unavailable("localStorage access denied".to_owned()))?
        .ok_or_else(|| StorageError::Unavailable("localStorage missing".to_owned()))
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        storage()?
            .get_item(key)
            .map_err(|_| StorageError::Unavailable(format!("read of `{key}` failed")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        storage()?
            .set_item(key, value)
            .map_err(|_| StorageError::Unavailable(format!("write of `{key}` failed (quota?)")))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        storage()?
            .remove_item(key)
            .map_err(|_| StorageError::Unavailable(format!("remove of `{key}` failed")))
    }
}
