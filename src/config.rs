//! Runtime configuration parsed from environment variables.
//!
//! Every knob has a default so the client works with no environment at all.
//! Identity-provider settings are optional: without a client id, external
//! sign-in is disabled rather than failing startup.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PROCESSING_DELAY_MS: u64 = 1500;
pub const DEFAULT_REPLY_DELAY_MS: u64 = 1000;
pub const DEFAULT_NOTICE_MS: u64 = 5000;
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:8000";

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// Fixed delays used by the simulated backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// How long an uploaded document stays "processing".
    pub processing_delay: Duration,
    /// How long the mocked assistant takes to reply.
    pub reply_delay: Duration,
    /// How long a notice banner stays visible.
    pub notice_duration: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            processing_delay: Duration::from_millis(DEFAULT_PROCESSING_DELAY_MS),
            reply_delay: Duration::from_millis(DEFAULT_REPLY_DELAY_MS),
            notice_duration: Duration::from_millis(DEFAULT_NOTICE_MS),
        }
    }
}

impl Timings {
    /// Read `DATAMIND_PROCESSING_DELAY_MS`, `DATAMIND_REPLY_DELAY_MS`, and
    /// `DATAMIND_NOTICE_MS`, falling back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            processing_delay: Duration::from_millis(env_parse(
                "DATAMIND_PROCESSING_DELAY_MS",
                DEFAULT_PROCESSING_DELAY_MS,
            )),
            reply_delay: Duration::from_millis(env_parse("DATAMIND_REPLY_DELAY_MS", DEFAULT_REPLY_DELAY_MS)),
            notice_duration: Duration::from_millis(env_parse("DATAMIND_NOTICE_MS", DEFAULT_NOTICE_MS)),
        }
    }
}

/// OAuth client settings for the external identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: Option<String>,
    pub redirect_uri: String,
}

impl OAuthConfig {
    /// Load from `OAUTH_CLIENT_ID`, `OAUTH_CLIENT_SECRET`, `OAUTH_REDIRECT_URI`.
    /// Returns `None` if the client id is missing or blank.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let client_id = std::env::var("OAUTH_CLIENT_ID").ok().filter(|v| !v.trim().is_empty())?;
        let client_secret = std::env::var("OAUTH_CLIENT_SECRET").ok().filter(|v| !v.trim().is_empty());
        let redirect_uri = std::env::var("OAUTH_REDIRECT_URI").unwrap_or_else(|_| DEFAULT_REDIRECT_URI.to_owned());
        Some(Self { client_id, client_secret, redirect_uri })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub timings: Timings,
    /// Location of the native key-value store file.
    pub store_path: PathBuf,
    pub oauth: Option<OAuthConfig>,
}

impl Config {
    #[must_use]
    pub fn from_env() -> Self {
        let store_path = std::env::var_os("DATAMIND_STORE_PATH").map_or_else(default_store_path, PathBuf::from);
        Self { timings: Timings::from_env(), store_path, oauth: OAuthConfig::from_env() }
    }
}

fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("USERPROFILE").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// `$HOME/.datamind/storage.json`.
#[must_use]
pub fn default_store_path() -> PathBuf {
    home_dir().join(".datamind").join("storage.json")
}
