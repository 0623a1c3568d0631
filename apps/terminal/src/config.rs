//! Runtime configuration from the environment.

use crate::fetch::SourceBase;
use flipdeck_core::{BlankRecords, CatalogError, DatasetCatalog, DatasetDescriptor, Locator};
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_SWIPE_THRESHOLD: f64 = 8.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },

    #[error("failed to read dataset catalog {path}: {source}")]
    CatalogRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse dataset catalog {path}: {source}")]
    CatalogParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid dataset catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// How to find a speech program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechSetting {
    /// Look for the usual programs on PATH.
    Auto,
    Off,
    Program(String),
}

impl SpeechSetting {
    fn parse(value: &str) -> Self {
        match value {
            "auto" | "" => Self::Auto,
            "off" | "none" => Self::Off,
            program => Self::Program(program.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub source_base: SourceBase,
    pub datasets_file: Option<PathBuf>,
    pub preferences_path: PathBuf,
    pub log_file: PathBuf,
    pub swipe_threshold: f64,
    pub speech: SpeechSetting,
    pub blank_records: BlankRecords,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let source_base = SourceBase::parse(
            &lookup("FLIPDECK_SOURCE_BASE").unwrap_or_else(|| ".".to_string()),
        )
        .map_err(|value| ConfigError::Invalid {
            var: "FLIPDECK_SOURCE_BASE",
            value,
        })?;

        let swipe_threshold = match lookup("FLIPDECK_SWIPE_THRESHOLD") {
            Some(value) => value
                .parse::<f64>()
                .ok()
                .filter(|t| t.is_finite() && *t >= 0.0)
                .ok_or(ConfigError::Invalid {
                    var: "FLIPDECK_SWIPE_THRESHOLD",
                    value,
                })?,
            None => DEFAULT_SWIPE_THRESHOLD,
        };

        let blank_records = match lookup("FLIPDECK_BLANK_RECORDS") {
            Some(value) => value
                .parse::<BlankRecords>()
                .map_err(|value| ConfigError::Invalid {
                    var: "FLIPDECK_BLANK_RECORDS",
                    value,
                })?,
            None => BlankRecords::default(),
        };

        let speech = lookup("FLIPDECK_SPEECH")
            .map(|value| SpeechSetting::parse(&value))
            .unwrap_or(SpeechSetting::Auto);

        Ok(Self {
            source_base,
            datasets_file: lookup("FLIPDECK_DATASETS").map(PathBuf::from),
            preferences_path: lookup("FLIPDECK_PREFERENCES")
                .map(PathBuf::from)
                .unwrap_or_else(default_preferences_path),
            log_file: lookup("FLIPDECK_LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(default_log_path),
            swipe_threshold,
            speech,
            blank_records,
        })
    }

    /// The dataset catalog: the configured file, or the built-in sets.
    pub fn catalog(&self) -> Result<DatasetCatalog, ConfigError> {
        let datasets = match &self.datasets_file {
            Some(path) => read_catalog_file(path)?,
            None => default_datasets(),
        };
        Ok(DatasetCatalog::new(datasets)?)
    }
}

fn default_preferences_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("flipdeck")
        .join("preferences.json")
}

fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("flipdeck")
        .join("flipdeck.log")
}

fn read_catalog_file(path: &Path) -> Result<Vec<DatasetDescriptor>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::CatalogRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ConfigError::CatalogParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Sets available when no catalog file is configured.
pub fn default_datasets() -> Vec<DatasetDescriptor> {
    vec![
        DatasetDescriptor::new("all", "All words", [Locator::new("english_words.json")]),
        DatasetDescriptor::new(
            "combined",
            "All units (Unit 1 + Unit 2)",
            [Locator::new("unit1.json"), Locator::new("unit2.json")],
        ),
        DatasetDescriptor::new("unit1", "Unit 1", [Locator::new("unit1.json")]),
        DatasetDescriptor::new("unit2", "Unit 2", [Locator::new("unit2.json")]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.source_base, SourceBase::Dir(PathBuf::from(".")));
        assert_eq!(config.swipe_threshold, DEFAULT_SWIPE_THRESHOLD);
        assert_eq!(config.speech, SpeechSetting::Auto);
        assert_eq!(config.blank_records, BlankRecords::Skip);
        assert!(config.datasets_file.is_none());
        assert!(config.preferences_path.ends_with("flipdeck/preferences.json"));
    }

    #[test]
    fn reads_every_variable() {
        let config = Config::from_lookup(lookup(&[
            ("FLIPDECK_SOURCE_BASE", "https://cards.example.com/sets/"),
            ("FLIPDECK_SWIPE_THRESHOLD", "12"),
            ("FLIPDECK_SPEECH", "off"),
            ("FLIPDECK_BLANK_RECORDS", "keep"),
            ("FLIPDECK_DATASETS", "/etc/flipdeck/sets.json"),
            ("FLIPDECK_PREFERENCES", "/tmp/prefs.json"),
            ("FLIPDECK_LOG_FILE", "/tmp/flipdeck.log"),
        ]))
        .unwrap();

        assert!(matches!(config.source_base, SourceBase::Url(_)));
        assert_eq!(config.swipe_threshold, 12.0);
        assert_eq!(config.speech, SpeechSetting::Off);
        assert_eq!(config.blank_records, BlankRecords::Keep);
        assert_eq!(
            config.datasets_file,
            Some(PathBuf::from("/etc/flipdeck/sets.json"))
        );
        assert_eq!(config.preferences_path, PathBuf::from("/tmp/prefs.json"));
        assert_eq!(config.log_file, PathBuf::from("/tmp/flipdeck.log"));
    }

    #[test]
    fn rejects_bad_threshold() {
        for bad in ["wide", "-3", "NaN"] {
            let err = Config::from_lookup(lookup(&[("FLIPDECK_SWIPE_THRESHOLD", bad)])).unwrap_err();
            assert!(matches!(
                err,
                ConfigError::Invalid {
                    var: "FLIPDECK_SWIPE_THRESHOLD",
                    ..
                }
            ));
        }
    }

    #[test]
    fn rejects_unknown_blank_policy() {
        let err = Config::from_lookup(lookup(&[("FLIPDECK_BLANK_RECORDS", "maybe")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value for FLIPDECK_BLANK_RECORDS: maybe"
        );
    }

    #[test]
    fn speech_program_override() {
        let config = Config::from_lookup(lookup(&[("FLIPDECK_SPEECH", "espeak")])).unwrap();
        assert_eq!(config.speech, SpeechSetting::Program("espeak".to_string()));
    }

    #[test]
    fn built_in_catalog_is_valid() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.len(), 4);
        assert!(catalog.find("combined").unwrap().is_composite());
    }

    #[test]
    fn catalog_file_is_read_and_validated() {
        let dir = std::env::temp_dir().join(format!("flipdeck-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("sets.json");
        std::fs::write(
            &path,
            r#"[{"id":"verbs","name":"Verbs","sources":["verbs.json"]},{"id":"verbs","name":"Again","sources":["x.json"]}]"#,
        )
        .unwrap();

        let mut config = Config::from_lookup(lookup(&[])).unwrap();
        config.datasets_file = Some(path.clone());
        let err = config.catalog().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Catalog(CatalogError::DuplicateId { .. })
        ));

        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            config.catalog().unwrap_err(),
            ConfigError::CatalogParse { .. }
        ));

        std::fs::remove_dir_all(&dir).ok();
    }
}
