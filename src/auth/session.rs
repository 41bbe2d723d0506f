//! Email/password auth and the active-session record.
//!
//! SYSTEM CONTEXT
//! ==============
//! Credential records live under `users` as a JSON array; the signed-in user
//! lives under `user`. This service is the only writer of both keys. A
//! successful login or logout asks the caller to reload so every component
//! re-reads the session from storage.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use super::identity::{self, IdentityProvider};
use super::{AuthError, AuthOutcome, Operation, normalize_email};
use crate::storage::{KeyValueStore, keys, load_json, save_json};
use crate::types::{CredentialRecord, IdentityProfile, Preferences, User};

const SIGNUP_OK: &str = "Signup successfully completed";
const LOGIN_OK: &str = "Login successfully completed";
const LOGOUT_OK: &str = "Logged out";
const PICTURE_OK: &str = "Profile picture updated";
const PREFERENCES_OK: &str = "Preferences updated";
const RESET_OK: &str = "Password reset instructions have been sent to your email.";

/// Session/auth manager over an injected key-value store.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn KeyValueStore>,
}

impl AuthService {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    // =========================================================================
    // SIGNUP / LOGIN / LOGOUT
    // =========================================================================

    /// Register a new credential record. Fails with `E_DUPLICATE_EMAIL` if the
    /// exact email is already registered.
    pub fn signup(&self, username: &str, email: &str, password: &str) -> AuthOutcome {
        match self.try_signup(username, email, password) {
            Ok(record) => {
                info!(user_id = %record.id, "auth: signup completed");
                AuthOutcome::ok(SIGNUP_OK)
            }
            Err(e) => self.failure(Operation::Signup, &e),
        }
    }

    fn try_signup(&self, username: &str, email: &str, password: &str) -> Result<CredentialRecord, AuthError> {
        let mut users = self.credentials()?;
        if users.iter().any(|u| u.email == email) {
            return Err(AuthError::DuplicateEmail);
        }

        let record = CredentialRecord {
            id: format!("user-{}", Uuid::new_v4().simple()),
            username: username.to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
            profile_picture: None,
        };
        users.push(record.clone());
        save_json(self.store.as_ref(), keys::USERS, &users)?;
        Ok(record)
    }

    /// Check credentials and write the active session.
    pub fn login(&self, email: &str, password: &str) -> AuthOutcome {
        match self.try_login(email, password) {
            Ok(user) => {
                info!(user_id = %user.id, "auth: login completed");
                AuthOutcome::ok(LOGIN_OK).with_reload().with_user(user)
            }
            Err(e) => self.failure(Operation::Login, &e),
        }
    }

    fn try_login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let users = self.credentials()?;
        let record = users
            .iter()
            .find(|u| u.email == email)
            .filter(|u| u.password == password)
            .ok_or(AuthError::InvalidCredentials)?;

        let user = record.session_user();
        save_json(self.store.as_ref(), keys::USER, &user)?;
        Ok(user)
    }

    /// Drop the active session.
    pub fn logout(&self) -> AuthOutcome {
        let result = self
            .store
            .remove(keys::USER)
            .and_then(|()| self.store.remove(keys::IS_AUTHENTICATED));
        match result {
            Ok(()) => {
                info!("auth: logout completed");
                AuthOutcome::ok(LOGOUT_OK).with_reload()
            }
            Err(e) => self.failure(Operation::Logout, &e.into()),
        }
    }

    // =========================================================================
    // SESSION QUERIES
    // =========================================================================

    /// The stored session user, if any. Unreadable or malformed records are
    /// logged and treated as signed out.
    #[must_use]
    pub fn current_session(&self) -> Option<User> {
        match load_json::<User>(self.store.as_ref(), keys::USER) {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "auth: ignoring unreadable session record");
                None
            }
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current_session().is_some()
    }

    // =========================================================================
    // PROFILE
    // =========================================================================

    /// Set or clear (empty string) the signed-in user's profile picture. The
    /// matching credential record is updated too so the picture survives the
    /// next login.
    pub fn update_profile_picture(&self, picture: &str) -> AuthOutcome {
        match self.try_update_profile_picture(picture) {
            Ok(user) => AuthOutcome::ok(PICTURE_OK).with_user(user),
            Err(e) => self.failure(Operation::Profile, &e),
        }
    }

    /// Credential record first, session second. A failed session write puts
    /// the previous credential list back so the two keys never disagree.
    fn try_update_profile_picture(&self, picture: &str) -> Result<User, AuthError> {
        let mut user = self.require_session()?;
        let picture = Some(picture.trim().to_owned()).filter(|p| !p.is_empty());

        let previous = self.credentials()?;
        let mut users = previous.clone();
        let record = users.iter_mut().find(|u| u.id == user.id);
        let credentials_changed = record.is_some();
        if let Some(record) = record {
            record.profile_picture.clone_from(&picture);
            save_json(self.store.as_ref(), keys::USERS, &users)?;
        }

        user.profile_picture = picture;
        if let Err(e) = save_json(self.store.as_ref(), keys::USER, &user) {
            if credentials_changed {
                if let Err(restore) = save_json(self.store.as_ref(), keys::USERS, &previous) {
                    warn!(error = %restore, "auth: could not restore credential records");
                }
            }
            return Err(e.into());
        }
        Ok(user)
    }

    /// Replace the signed-in user's display preferences.
    pub fn update_preferences(&self, preferences: Preferences) -> AuthOutcome {
        let result = self.require_session().and_then(|mut user| {
            user.preferences = preferences;
            save_json(self.store.as_ref(), keys::USER, &user)?;
            Ok(user)
        });
        match result {
            Ok(user) => AuthOutcome::ok(PREFERENCES_OK).with_user(user),
            Err(e) => self.failure(Operation::Profile, &e),
        }
    }

    /// Validate a password-reset request. There is no mail backend: a
    /// well-formed address always succeeds and nothing is looked up.
    pub fn request_password_reset(&self, email: &str) -> AuthOutcome {
        let result = if email.trim().is_empty() {
            Err(AuthError::MissingEmail)
        } else {
            normalize_email(email).ok_or(AuthError::InvalidEmail)
        };
        match result {
            Ok(_) => {
                info!("auth: password reset requested");
                AuthOutcome::ok(RESET_OK)
            }
            Err(e) => self.failure(Operation::PasswordReset, &e),
        }
    }

    // =========================================================================
    // EXTERNAL IDENTITY
    // =========================================================================

    /// Write a session for a profile returned by the identity provider.
    pub fn complete_external_sign_in(&self, profile: &IdentityProfile) -> AuthOutcome {
        match self.try_external_sign_in(profile) {
            Ok(user) => {
                info!(user_id = %user.id, "auth: external sign-in completed");
                let message = format!("Google Sign-in successful! Welcome {}", user.name);
                AuthOutcome::ok(message).with_reload().with_user(user)
            }
            Err(e) => self.failure(Operation::ExternalSignIn, &e),
        }
    }

    fn try_external_sign_in(&self, profile: &IdentityProfile) -> Result<User, AuthError> {
        let user = profile.session_user();
        save_json(self.store.as_ref(), keys::USER, &user)?;
        self.store.set(keys::IS_AUTHENTICATED, "true")?;
        Ok(user)
    }

    /// Sign in from a provider-issued id token (JWT). Only the payload is
    /// read; the signature is the provider's concern.
    pub fn sign_in_with_id_token(&self, token: &str) -> AuthOutcome {
        match identity::decode_id_token(token) {
            Ok(profile) => self.complete_external_sign_in(&profile),
            Err(e) => self.failure(Operation::ExternalSignIn, &AuthError::DecodeFailure(e.to_string())),
        }
    }

    /// Exchange an authorization code through `provider`, then sign in.
    pub async fn sign_in_with_code(&self, provider: &dyn IdentityProvider, code: &str) -> AuthOutcome {
        match provider.exchange_code(code).await {
            Ok(profile) => self.complete_external_sign_in(&profile),
            Err(e) => self.failure(Operation::ExternalSignIn, &e.into()),
        }
    }

    // =========================================================================
    // HELPERS
    // =========================================================================

    fn credentials(&self) -> Result<Vec<CredentialRecord>, AuthError> {
        Ok(load_json(self.store.as_ref(), keys::USERS)?.unwrap_or_default())
    }

    fn require_session(&self) -> Result<User, AuthError> {
        load_json(self.store.as_ref(), keys::USER)?.ok_or(AuthError::NotSignedIn)
    }

    #[allow(clippy::unused_self)]
    fn failure(&self, op: Operation, err: &AuthError) -> AuthOutcome {
        match err {
            AuthError::StorageFailure(_) | AuthError::DecodeFailure(_) | AuthError::IdentityExchange(_) => {
                warn!(?op, error = %err, code = err.error_code(), "auth: operation failed");
            }
            _ => info!(?op, code = err.error_code(), "auth: operation rejected"),
        }
        AuthOutcome::failed(op, err)
    }
}
