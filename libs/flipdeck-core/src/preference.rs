//! Persisted dataset selection.

use crate::error::PreferenceError;

/// Storage for the last selected dataset id.
pub trait PreferenceStore {
    /// The saved id, or `None` if nothing was ever selected.
    fn selected_dataset(&self) -> Option<String>;

    fn set_selected_dataset(&mut self, id: &str) -> Result<(), PreferenceError>;
}

/// Preference store that lives only as long as the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryPreferences {
    selected: Option<String>,
}

impl MemoryPreferences {
    pub fn new(selected: Option<String>) -> Self {
        Self { selected }
    }
}

impl PreferenceStore for MemoryPreferences {
    fn selected_dataset(&self) -> Option<String> {
        self.selected.clone()
    }

    fn set_selected_dataset(&mut self, id: &str) -> Result<(), PreferenceError> {
        self.selected = Some(id.to_string());
        Ok(())
    }
}
