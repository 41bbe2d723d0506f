//! Persistent key-value storage seam.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser build persists session identity in `localStorage`; native builds
//! and tests inject a file-backed or in-memory store instead. Everything above
//! this module sees only string keys and string values.
//!
//! TRADE-OFFS
//! ==========
//! Values are opaque strings, so typed records go through [`load_json`] and
//! [`save_json`]. There is no transaction discipline: each key has exactly one
//! logical writer.

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;

#[cfg(feature = "hydrate")]
pub mod browser;
#[cfg(not(target_arch = "wasm32"))]
pub mod file;
pub mod memory;

use serde::Serialize;
use serde::de::DeserializeOwned;

#[cfg(feature = "hydrate")]
pub use browser::LocalStorage;
#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
pub use memory::MemoryStore;

/// Well-known storage keys.
pub mod keys {
    /// Active session user.
    pub const USER: &str = "user";
    /// Array of credential records.
    pub const USERS: &str = "users";
    /// Secondary session marker.
    pub const AUTH: &str = "auth";
    /// Last registered email/password pair.
    pub const REGISTERED_USER: &str = "registeredUser";
    /// `"true"` after an external identity sign-in.
    pub const IS_AUTHENTICATED: &str = "isAuthenticated";
    /// Persisted light/dark preference.
    pub const THEME_PREFERENCE: &str = "theme-preference";
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored value is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Durable string-keyed storage.
///
/// Methods take `&self`; backends use interior mutability so one store can be
/// shared behind an `Arc` by every component that needs it.
pub trait KeyValueStore: Send + Sync {
    /// Read the value for `key`, or `None` if unset.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an unset key is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Load and decode a JSON value stored under `key`.
///
/// # Errors
///
/// Fails if the backend read fails or the stored string is not valid JSON for `T`.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>, StorageError> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    Ok(Some(serde_json::from_str(&raw)?))
}

/// Encode `value` as JSON and store it under `key`.
///
/// # Errors
///
/// Fails if encoding or the backend write fails.
pub fn save_json<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}
