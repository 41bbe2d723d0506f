//! UI chrome state: theme, processing indicator, and the notice banner.
//!
//! DESIGN
//! ======
//! Kept apart from documents and chat so presentation toggles never touch
//! domain data.

use serde::Serialize;

use crate::types::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient banner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UiState {
    pub theme: Theme,
    /// True while a freshly added document is being "analyzed".
    pub processing: bool,
    pub notice: Option<Notice>,
}
