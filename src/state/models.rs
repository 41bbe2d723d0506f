//! Model catalog and selection.

use crate::services::catalog;
use crate::types::AiModel;

/// Available models and the current selection.
///
/// The selection is not checked against `available`; callers choose from the
/// catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelsState {
    pub available: Vec<AiModel>,
    pub selected: Option<AiModel>,
}

impl Default for ModelsState {
    fn default() -> Self {
        let available = catalog::default_models();
        let selected = available.first().cloned();
        Self { available, selected }
    }
}

impl ModelsState {
    pub fn select(&mut self, model: Option<AiModel>) {
        self.selected = model;
    }

    #[must_use]
    pub fn selected_name(&self) -> Option<&str> {
        self.selected.as_ref().map(|m| m.name.as_str())
    }
}
