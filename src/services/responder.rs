//! Mocked AI responder.
//!
//! DESIGN
//! ======
//! `send` appends the user's message, then schedules exactly one assistant
//! message after the reply delay. The model name and active document are
//! captured when the user sends, so the reply names what the user was looking
//! at even if the selection changes while it is pending.
//!
//! Nothing cancels a pending reply: clearing the transcript or switching
//! documents still lets it land. Callers that want otherwise hold on to the
//! returned [`TaskHandle`].

#[cfg(test)]
#[path = "responder_test.rs"]
mod responder_test;

use tracing::debug;

use crate::scheduler::TaskHandle;
use crate::state::AppStore;
use crate::types::{ChatMessage, Role};

const MODEL_PLACEHOLDER: &str = "the AI";
const DOCUMENT_PLACEHOLDER: &str = "your document";

/// Reply text naming the model and document, with placeholders for either.
#[must_use]
pub fn compose_reply(model: Option<&str>, document: Option<&str>) -> String {
    format!(
        "This is a simulated response from {} about \"{}\"",
        model.unwrap_or(MODEL_PLACEHOLDER),
        document.unwrap_or(DOCUMENT_PLACEHOLDER)
    )
}

#[derive(Clone)]
pub struct ChatResponder {
    store: AppStore,
}

impl ChatResponder {
    #[must_use]
    pub fn new(store: AppStore) -> Self {
        Self { store }
    }

    /// Post `text` as the user and schedule the simulated reply.
    ///
    /// Whitespace-only input is ignored and returns `None`. Anything else is
    /// stored exactly as typed.
    pub fn send(&self, text: &str) -> Option<TaskHandle> {
        if text.trim().is_empty() {
            return None;
        }

        let (model, document_id, document_name) = self.store.read(|s| {
            (
                s.models.selected_name().map(str::to_owned),
                s.documents.current.as_ref().map(|d| d.id.clone()),
                s.documents.current.as_ref().map(|d| d.name.clone()),
            )
        });

        self.store.add_chat_message(ChatMessage::new(Role::User, text, document_id.clone()));

        let reply = compose_reply(model.as_deref(), document_name.as_deref());
        let store = self.store.clone();
        let delay = self.store.timings().reply_delay;
        debug!(?delay, document_id = ?document_id, "responder: reply scheduled");
        let handle = self.store.scheduler().schedule(
            delay,
            Box::new(move || store.add_chat_message(ChatMessage::new(Role::Assistant, reply, document_id))),
        );
        Some(handle)
    }
}
