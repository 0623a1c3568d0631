//! Dataset preference kept in a small JSON file.

use flipdeck_core::{PreferenceError, PreferenceStore};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Stored {
    dataset_id: Option<String>,
}

pub struct FilePreferences {
    path: PathBuf,
    selected: Option<String>,
}

impl FilePreferences {
    /// Open the preference file. A missing or unreadable file means no
    /// saved selection.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let selected = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Stored>(&content) {
                Ok(stored) => stored.dataset_id,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "ignoring corrupt preference file");
                    None
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read preference file");
                None
            }
        };

        Self { path, selected }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FilePreferences {
    fn selected_dataset(&self) -> Option<String> {
        self.selected.clone()
    }

    fn set_selected_dataset(&mut self, id: &str) -> Result<(), PreferenceError> {
        self.selected = Some(id.to_string());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let stored = Stored {
            dataset_id: self.selected.clone(),
        };
        std::fs::write(&self.path, serde_json::to_string_pretty(&stored)?)?;
        Ok(())
    }
}
