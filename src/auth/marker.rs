//! Secondary auth markers.
//!
//! A lighter flow than [`super::AuthService`]: it only records that someone
//! signed in (`auth`) and remembers the last registration form (`registeredUser`).
//! Route guards can consult either flow.

#[cfg(test)]
#[path = "marker_test.rs"]
mod marker_test;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::storage::{KeyValueStore, StorageError, keys, load_json, save_json};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct MarkerRecord {
    email: String,
}

/// The last email/password pair submitted on the registration form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredUser {
    pub email: String,
    pub password: String,
}

#[derive(Clone)]
pub struct AuthMarker {
    store: Arc<dyn KeyValueStore>,
}

impl AuthMarker {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Record that `email` signed in.
    ///
    /// # Errors
    ///
    /// Fails if the marker cannot be written.
    pub fn mark_authenticated(&self, email: &str) -> Result<(), StorageError> {
        save_json(self.store.as_ref(), keys::AUTH, &MarkerRecord { email: email.to_owned() })
    }

    /// Whether any marker is present. Read failures count as absent.
    #[must_use]
    pub fn has_marker(&self) -> bool {
        match self.store.get(keys::AUTH) {
            Ok(value) => value.is_some(),
            Err(e) => {
                warn!(error = %e, "auth marker unreadable");
                false
            }
        }
    }

    /// Email recorded by the marker, if it holds one.
    #[must_use]
    pub fn marked_email(&self) -> Option<String> {
        load_json::<MarkerRecord>(self.store.as_ref(), keys::AUTH)
            .ok()
            .flatten()
            .map(|m| m.email)
    }

    /// # Errors
    ///
    /// Fails if the marker cannot be removed.
    pub fn clear_marker(&self) -> Result<(), StorageError> {
        self.store.remove(keys::AUTH)
    }

    /// # Errors
    ///
    /// Fails if the record cannot be written.
    pub fn remember_registration(&self, email: &str, password: &str) -> Result<(), StorageError> {
        let record = RegisteredUser { email: email.to_owned(), password: password.to_owned() };
        save_json(self.store.as_ref(), keys::REGISTERED_USER, &record)
    }

    #[must_use]
    pub fn registered_user(&self) -> Option<RegisteredUser> {
        load_json(self.store.as_ref(), keys::REGISTERED_USER).ok().flatten()
    }
}
