//! Document collection and the active-document reference.

#[cfg(test)]
#[path = "documents_test.rs"]
mod documents_test;

use crate::types::Document;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentsState {
    /// Upload order.
    pub items: Vec<Document>,
    /// The document the UI is showing, if any.
    pub current: Option<Document>,
}

impl DocumentsState {
    /// Append `doc` and make it current.
    pub fn add(&mut self, doc: Document) {
        self.items.push(doc.clone());
        self.current = Some(doc);
    }

    /// Remove every document with `id`. Clears the current reference if it
    /// pointed at one of them. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|d| d.id != id);
        if self.current.as_ref().is_some_and(|d| d.id == id) {
            self.current = None;
        }
        self.items.len() != before
    }

    pub fn set_current(&mut self, doc: Option<Document>) {
        self.current = doc;
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Document> {
        self.items.iter().find(|d| d.id == id)
    }

    #[must_use]
    pub fn current_id(&self) -> Option<&str> {
        self.current.as_ref().map(|d| d.id.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
