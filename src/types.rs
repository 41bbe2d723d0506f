//! Shared domain records for users, documents, chat, and model descriptors.
//!
//! DESIGN
//! ======
//! Records that land in the key-value store use camelCase field names so the
//! stored JSON matches what the browser build reads and writes. Timestamps are
//! RFC 3339 strings on the wire.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

// =============================================================================
// USERS
// =============================================================================

/// UI color theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// The other theme value.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a stored theme string; anything unrecognized is `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

/// Reading font size preference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

/// Per-user display preferences.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub theme: Theme,
    pub font_size: FontSize,
}

/// Active-session user view, stored under the `user` key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub preferences: Preferences,
    /// Profile image reference (URL or data URI). Empty strings are treated as absent.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "non_empty_string")]
    pub profile_picture: Option<String>,
}

/// Stored credential tuple used by the mocked email/password login.
///
/// Passwords are kept in plaintext; this mirrors the browser build, which has
/// no server to hash against.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "non_empty_string")]
    pub profile_picture: Option<String>,
}

impl CredentialRecord {
    /// Build the session view for this record with default preferences.
    #[must_use]
    pub fn session_user(&self) -> User {
        User {
            id: self.id.clone(),
            name: self.username.clone(),
            email: self.email.clone(),
            preferences: Preferences::default(),
            profile_picture: self.profile_picture.clone(),
        }
    }
}

/// Profile returned by the external identity provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub picture: Option<String>,
}

impl IdentityProfile {
    #[must_use]
    pub fn session_user(&self) -> User {
        User {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            preferences: Preferences::default(),
            profile_picture: self.picture.clone().filter(|p| !p.is_empty()),
        }
    }
}

fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

// =============================================================================
// DOCUMENTS
// =============================================================================

/// An uploaded document descriptor. Content is never read; the size and MIME
/// type come from the picked file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub name: String,
    /// MIME type as reported by the file picker (may be empty).
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Size in bytes.
    pub size: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub upload_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub last_modified: OffsetDateTime,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

// =============================================================================
// CHAT
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One transcript entry. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
}

impl ChatMessage {
    /// Create a message stamped now with a fresh id.
    #[must_use]
    pub fn new(role: Role, content: impl Into<String>, document_id: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: OffsetDateTime::now_utc(),
            document_id,
        }
    }
}

// =============================================================================
// MODELS
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provider {
    OpenAI,
    Anthropic,
    Cohere,
    Nemontron,
    AssemblyAI,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Summarization,
    Chat,
    Grammar,
}

/// Static descriptor of a selectable AI model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiModel {
    pub id: String,
    pub name: String,
    pub provider: Provider,
    pub capabilities: Vec<Capability>,
    pub description: String,
}

impl AiModel {
    #[must_use]
    pub fn supports(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}
