//! Shared application state store.
//!
//! SYSTEM CONTEXT
//! ==============
//! Owned by the composition root and handed to consumers by cloning the
//! handle. The presentation layer reads [`AppStore::snapshot`] or watches
//! [`AppStore::subscribe`]; the responder and upload flows call the mutation
//! methods.
//!
//! DESIGN
//! ======
//! Every operation runs to completion under one mutex and then publishes the
//! whole [`AppState`] on a `watch` channel, so an observer never sees a half
//! applied change. Timed effects (processing reset, notice dismissal) go
//! through the injected [`Scheduler`] and call back into the store like any
//! other caller.
//!
//! TRADE-OFFS
//! ==========
//! The processing reset is never cancelled. With overlapping uploads the
//! earliest reset clears the flag while later documents are still "in
//! analysis". Notices are the exception: a newer notice cancels the pending
//! dismissal of the one it replaces.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tracing::debug;

use super::{AppState, Notice, NoticeKind};
use crate::config::Timings;
use crate::scheduler::{Scheduler, TaskHandle};
use crate::types::{AiModel, ChatMessage, Document, Theme, User};

/// Cloneable handle to the single state container.
#[derive(Clone)]
pub struct AppStore {
    inner: Arc<Inner>,
}

struct Inner {
    state: Mutex<AppState>,
    updates: watch::Sender<AppState>,
    scheduler: Arc<dyn Scheduler>,
    timings: Timings,
    notice_timer: Mutex<Option<TaskHandle>>,
}

impl AppStore {
    #[must_use]
    pub fn new(scheduler: Arc<dyn Scheduler>, timings: Timings) -> Self {
        Self::with_state(AppState::default(), scheduler, timings)
    }

    #[must_use]
    pub fn with_state(initial: AppState, scheduler: Arc<dyn Scheduler>, timings: Timings) -> Self {
        let (updates, _) = watch::channel(initial.clone());
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(initial),
                updates,
                scheduler,
                timings,
                notice_timer: Mutex::new(None),
            }),
        }
    }

    #[must_use]
    pub fn timings(&self) -> Timings {
        self.inner.timings
    }

    pub(crate) fn scheduler(&self) -> &Arc<dyn Scheduler> {
        &self.inner.scheduler
    }

    // =========================================================================
    // OBSERVATION
    // =========================================================================

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> AppState {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Receiver that yields a fresh snapshot after every mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.inner.updates.subscribe()
    }

    /// Read a projection of the state without cloning all of it.
    pub fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        let state = self.inner.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    fn update<R>(&self, op: &'static str, f: impl FnOnce(&mut AppState) -> R) -> R {
        let mut state = self.inner.state.lock().unwrap_or_else(PoisonError::into_inner);
        let out = f(&mut state);
        self.inner.updates.send_replace(state.clone());
        debug!(op, documents = state.documents.len(), messages = state.chat.len(), "store: updated");
        out
    }

    // =========================================================================
    // SESSION
    // =========================================================================

    pub fn set_user(&self, user: Option<User>) {
        self.update("set_user", |s| s.user = user);
    }

    // =========================================================================
    // DOCUMENTS
    // =========================================================================

    /// Append `doc`, make it current, and mark processing. The processing flag
    /// clears after the configured delay; the returned handle can cancel that
    /// reset but the store never does.
    pub fn add_document(&self, doc: Document) -> TaskHandle {
        self.update("add_document", |s| {
            s.documents.add(doc);
            s.ui.processing = true;
        });
        let store = self.clone();
        self.inner
            .scheduler
            .schedule(self.inner.timings.processing_delay, Box::new(move || store.set_processing(false)))
    }

    /// Remove the document with `id`, clearing the current reference if it
    /// was the one removed.
    pub fn remove_document(&self, id: &str) -> bool {
        self.update("remove_document", |s| s.documents.remove(id))
    }

    pub fn set_current_document(&self, doc: Option<Document>) {
        self.update("set_current_document", |s| s.documents.set_current(doc));
    }

    pub fn set_processing(&self, processing: bool) {
        self.update("set_processing", |s| s.ui.processing = processing);
    }

    // =========================================================================
    // CHAT
    // =========================================================================

    pub fn add_chat_message(&self, message: ChatMessage) {
        self.update("add_chat_message", |s| s.chat.push(message));
    }

    pub fn clear_chat_messages(&self) {
        self.update("clear_chat_messages", |s| s.chat.clear());
    }

    // =========================================================================
    // MODELS / THEME
    // =========================================================================

    pub fn set_selected_model(&self, model: Option<AiModel>) {
        self.update("set_selected_model", |s| s.models.select(model));
    }

    /// Flip between light and dark; returns the new theme.
    pub fn toggle_theme(&self) -> Theme {
        self.update("toggle_theme", |s| {
            s.ui.theme = s.ui.theme.toggled();
            s.ui.theme
        })
    }

    pub fn set_theme(&self, theme: Theme) {
        self.update("set_theme", |s| s.ui.theme = theme);
    }

    // =========================================================================
    // NOTICES
    // =========================================================================

    /// Show a banner that dismisses itself after the notice duration.
    ///
    /// Lock order is `notice_timer` then state, here and in
    /// [`Self::dismiss_notice`], so the showing notice and the retained
    /// dismissal always belong together.
    pub fn notify(&self, kind: NoticeKind, message: impl Into<String>) -> TaskHandle {
        let notice = Notice { kind, message: message.into() };
        let mut timer = self.inner.notice_timer.lock().unwrap_or_else(PoisonError::into_inner);
        self.update("notify", |s| s.ui.notice = Some(notice.clone()));

        let store = self.clone();
        let handle = self.inner.scheduler.schedule(
            self.inner.timings.notice_duration,
            Box::new(move || store.expire_notice(&notice)),
        );
        if let Some(previous) = timer.replace(handle.clone()) {
            previous.cancel();
        }
        handle
    }

    pub fn dismiss_notice(&self) {
        let mut timer = self.inner.notice_timer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(pending) = timer.take() {
            pending.cancel();
        }
        self.update("dismiss_notice", |s| s.ui.notice = None);
    }

    fn expire_notice(&self, notice: &Notice) {
        self.update("expire_notice", |s| {
            if s.ui.notice.as_ref() == Some(notice) {
                s.ui.notice = None;
            }
        });
    }
}
