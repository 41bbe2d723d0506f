//! Chat transcript state.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use crate::types::ChatMessage;

/// Ordered transcript. Append-only between clears; no deduplication.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
}

impl ChatState {
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Messages appended after the one with id `last_seen`.
    ///
    /// When `last_seen` is `None` or no longer in the transcript (it was
    /// cleared since), every current message is new.
    #[must_use]
    pub fn since(&self, last_seen: Option<&str>) -> &[ChatMessage] {
        let start = last_seen
            .and_then(|id| self.messages.iter().position(|m| m.id == id))
            .map_or(0, |i| i + 1);
        &self.messages[start..]
    }
}
