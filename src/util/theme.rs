//! Theme preference persistence.
//!
//! Reads the light/dark preference from the `theme-preference` key, falling
//! back to the system preference when nothing is stored. In the browser build
//! [`apply`] also sets a `data-theme` attribute on the `<html>` element.
//!
//! TRADE-OFFS
//! ==========
//! Persistence is best effort: unreadable values fall back to the system
//! preference and non-browser builds skip the DOM update.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use tracing::warn;

use crate::storage::{KeyValueStore, StorageError, keys};
use crate::types::Theme;

/// Stored preference, else dark when the system prefers it, else light.
#[must_use]
pub fn read_preference(store: &dyn KeyValueStore, prefers_dark: bool) -> Theme {
    match store.get(keys::THEME_PREFERENCE) {
        Ok(Some(raw)) => {
            if let Some(theme) = Theme::parse(&raw) {
                return theme;
            }
            warn!(value = %raw, "theme: ignoring unrecognized stored preference");
        }
        Ok(None) => {}
        Err(e) => warn!(error = %e, "theme: preference unreadable"),
    }
    if prefers_dark { Theme::Dark } else { Theme::Light }
}

/// # Errors
///
/// Fails if the preference cannot be written.
pub fn persist(store: &dyn KeyValueStore, theme: Theme) -> Result<(), StorageError> {
    store.set(keys::THEME_PREFERENCE, theme.as_str())
}

/// Whether the environment asks for a dark color scheme.
#[must_use]
pub fn system_prefers_dark() -> bool {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
            .is_some_and(|mq| mq.matches())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        false
    }
}

/// Apply the `data-theme` attribute on the `<html>` element.
pub fn apply(theme: Theme) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(el) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.document_element()) {
            let _ = el.set_attribute("data-theme", theme.as_str());
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = theme;
    }
}
