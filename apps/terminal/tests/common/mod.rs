//! Shared setup for the terminal integration tests.
//!
//! Each test gets its own scratch directory holding the dataset files and
//! the preference file, and a `Config` pointing at it.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use flipdeck_terminal::config::Config;

static NEXT: AtomicUsize = AtomicUsize::new(0);

pub struct Workspace {
    dir: PathBuf,
}

impl Workspace {
    pub fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!(
            "flipdeck-it-{}-{}-{}",
            name,
            std::process::id(),
            NEXT.fetch_add(1, Ordering::SeqCst)
        ));
        std::fs::create_dir_all(&dir).unwrap();
        Self { dir }
    }

    pub fn preferences(&self) -> PathBuf {
        self.dir.join("preferences.json")
    }

    pub fn write(&self, name: &str, content: &str) {
        std::fs::write(self.dir.join(name), content).unwrap();
    }

    /// Pretend a previous run selected `id`.
    pub fn save_selection(&self, id: &str) {
        self.write(
            "preferences.json",
            &format!(r#"{{"dataset_id": "{}"}}"#, id),
        );
    }

    pub fn config(&self) -> Config {
        let vars: HashMap<&str, String> = HashMap::from([
            ("FLIPDECK_SOURCE_BASE", self.dir.display().to_string()),
            ("FLIPDECK_PREFERENCES", self.preferences().display().to_string()),
            ("FLIPDECK_LOG_FILE", self.dir.join("flipdeck.log").display().to_string()),
            ("FLIPDECK_SPEECH", "off".to_string()),
        ]);
        Config::from_lookup(|key| vars.get(key).cloned()).unwrap()
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        std::fs::remove_dir_all(&self.dir).ok();
    }
}

pub mod fixtures {
    pub const UNIT1: &str = r#"[
        {"question": "hiša", "answer": "house"},
        {"question": "pes", "answer": "dog"},
        {"question": "drevo", "answer": "tree"}
    ]"#;

    pub const UNIT2: &str = r#"[
        {"slovenian": "mačka", "english": "cat"},
        {"slovenian": "voda", "english": "water"}
    ]"#;
}
