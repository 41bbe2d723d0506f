//! Application state.
//!
//! ARCHITECTURE
//! ============
//! Domain slices are plain structs with pure mutation helpers:
//! [`documents`], [`chat`], [`models`], and [`ui`]. [`store::AppStore`] owns
//! one [`AppState`] behind a lock, applies each operation atomically, runs the
//! timed side effects through the injected scheduler, and publishes a full
//! snapshot to observers after every change.

pub mod chat;
pub mod documents;
pub mod models;
pub mod store;
pub mod ui;

pub use chat::ChatState;
pub use documents::DocumentsState;
pub use models::ModelsState;
pub use store::AppStore;
pub use ui::{Notice, NoticeKind, UiState};

use crate::types::User;

/// Everything the presentation layer renders from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppState {
    /// Session user mirrored from the auth manager.
    pub user: Option<User>,
    pub documents: DocumentsState,
    pub chat: ChatState,
    pub models: ModelsState,
    pub ui: UiState,
}
