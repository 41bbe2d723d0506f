//! Mocked authentication over the injected key-value store.
//!
//! ARCHITECTURE
//! ============
//! - [`session`]: email/password signup and login against stored credential
//!   records, the active-session record, and profile edits.
//! - [`identity`]: external identity provider glue (authorization URL,
//!   id-token decoding, code exchange).
//! - [`marker`]: the lightweight secondary auth markers (`auth`,
//!   `registeredUser`).
//!
//! ERROR HANDLING
//! ==============
//! Internally every step returns `Result<_, AuthError>`. Public operations
//! convert failures into an [`AuthOutcome`] with `success: false`, a
//! user-facing message, and a stable error code. Nothing escapes to the
//! presentation layer as an `Err` or a panic.


pub mod identity;
pub mod marker;
pub mod session;

use serde::Serialize;

pub use identity::{IdentityError, IdentityProvider};
pub use marker::AuthMarker;
pub use session::AuthService;

use crate::storage::StorageError;
use crate::types::User;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("email already registered")]
    DuplicateEmail,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("no active session")]
    NotSignedIn,
    #[error("email is required")]
    MissingEmail,
    #[error("invalid email")]
    InvalidEmail,
    #[error("storage failure: {0}")]
    StorageFailure(#[from] StorageError),
    #[error("identity token decode failed: {0}")]
    DecodeFailure(String),
    #[error("identity exchange failed: {0}")]
    IdentityExchange(#[from] IdentityError),
}

impl AuthError {
    /// Stable machine-readable code for this failure.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateEmail => "E_DUPLICATE_EMAIL",
            Self::InvalidCredentials => "E_INVALID_CREDENTIALS",
            Self::NotSignedIn => "E_NOT_SIGNED_IN",
            Self::MissingEmail => "E_MISSING_EMAIL",
            Self::InvalidEmail => "E_INVALID_EMAIL",
            Self::StorageFailure(_) => "E_STORAGE",
            Self::DecodeFailure(_) => "E_DECODE",
            Self::IdentityExchange(_) => "E_IDENTITY_EXCHANGE",
        }
    }
}

/// Which public operation produced an outcome; selects the generic failure text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operation {
    Signup,
    Login,
    Logout,
    Profile,
    PasswordReset,
    ExternalSignIn,
}

impl Operation {
    fn generic_failure(self) -> &'static str {
        match self {
            Self::Signup => "An error occurred during signup",
            Self::Login => "An error occurred during login",
            Self::Logout => "An error occurred during logout",
            Self::Profile => "An error occurred while updating your profile",
            Self::PasswordReset => "An error occurred while requesting a password reset",
            Self::ExternalSignIn => "Google sign-in failed",
        }
    }
}

/// Result of a public auth operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthOutcome {
    pub success: bool,
    pub message: String,
    /// Set when the caller should reload its acting context (session changed).
    pub reload: bool,
    /// Error code on failure, `None` on success.
    pub code: Option<&'static str>,
    /// The session user after the operation, when one applies.
    pub user: Option<User>,
}

impl AuthOutcome {
    pub(crate) fn ok(message: impl Into<String>) -> Self {
        Self { success: true, message: message.into(), reload: false, code: None, user: None }
    }

    pub(crate) fn with_reload(mut self) -> Self {
        self.reload = true;
        self
    }

    pub(crate) fn with_user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    pub(crate) fn failed(op: Operation, err: &AuthError) -> Self {
        let message = match err {
            AuthError::DuplicateEmail => "The account is already registered",
            AuthError::InvalidCredentials => "Incorrect email or password",
            AuthError::NotSignedIn => "You need to sign in first",
            AuthError::MissingEmail => "Please enter your email address.",
            AuthError::InvalidEmail => "Please enter a valid email address.",
            AuthError::StorageFailure(_) | AuthError::DecodeFailure(_) | AuthError::IdentityExchange(_) => {
                op.generic_failure()
            }
        };
        Self { success: false, message: message.to_owned(), reload: false, code: Some(err.error_code()), user: None }
    }
}

/// Normalize an email address for shape validation.
///
/// Stored credential lookups stay exact-match; this only decides whether an
/// input looks like an address at all.
#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    if normalized.is_empty() || !normalized.contains('@') {
        return None;
    }
    let parts = normalized.split('@').collect::<Vec<_>>();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return None;
    }
    Some(normalized)
}
