//! Core types for the study-card viewer.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Location of one dataset source (a URL or a path, resolved by the fetcher).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locator(String);

impl Locator {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named study set backed by one or more sources.
///
/// A descriptor with more than one source is a composite dataset: its cards
/// are the concatenation of every source, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetDescriptor {
    pub id: String,
    #[serde(alias = "name")]
    pub display_name: String,
    pub sources: Vec<Locator>,
}

impl DatasetDescriptor {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        sources: impl IntoIterator<Item = Locator>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            sources: sources.into_iter().collect(),
        }
    }

    pub fn is_composite(&self) -> bool {
        self.sources.len() > 1
    }
}

/// Where the viewer starts: which dataset is selected and whether to load it
/// right away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitialSelection {
    pub index: usize,
    pub auto_reload: bool,
}

/// The validated, immutable list of datasets known at startup.
#[derive(Debug, Clone)]
pub struct DatasetCatalog {
    datasets: Vec<DatasetDescriptor>,
}

impl DatasetCatalog {
    /// Validate and wrap the datasets: at least one, unique ids, no dataset
    /// without sources.
    pub fn new(datasets: Vec<DatasetDescriptor>) -> Result<Self, CatalogError> {
        if datasets.is_empty() {
            return Err(CatalogError::NoDatasets);
        }

        let mut seen = HashSet::new();
        for dataset in &datasets {
            if dataset.sources.is_empty() {
                return Err(CatalogError::NoSources {
                    id: dataset.id.clone(),
                });
            }
            if !seen.insert(dataset.id.as_str()) {
                return Err(CatalogError::DuplicateId {
                    id: dataset.id.clone(),
                });
            }
        }

        Ok(Self { datasets })
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DatasetDescriptor> {
        self.datasets.iter()
    }

    pub fn get(&self, index: usize) -> Option<&DatasetDescriptor> {
        self.datasets.get(index)
    }

    pub fn find(&self, id: &str) -> Option<&DatasetDescriptor> {
        self.datasets.iter().find(|d| d.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.datasets.iter().position(|d| d.id == id)
    }

    /// Pick the starting dataset from a saved preference.
    ///
    /// Any saved id triggers an immediate load. An id that is still in the
    /// catalog selects that dataset; an unknown one falls back to the first.
    /// Without a saved id the first dataset waits for an explicit reload.
    pub fn initial_selection(&self, saved: Option<&str>) -> InitialSelection {
        InitialSelection {
            index: saved.and_then(|id| self.position(id)).unwrap_or(0),
            auto_reload: saved.is_some(),
        }
    }
}

/// Both sides of a term pair before a direction is chosen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPair {
    /// Native-language side.
    pub primary_text: String,
    /// Foreign-language side, also the language spoken by audio playback.
    pub secondary_text: String,
}

impl RawPair {
    pub fn new(primary_text: impl Into<String>, secondary_text: impl Into<String>) -> Self {
        Self {
            primary_text: primary_text.into(),
            secondary_text: secondary_text.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.primary_text.is_empty() && self.secondary_text.is_empty()
    }
}

/// A display-ready card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Position in the shuffled sequence.
    pub id: usize,
    pub front: String,
    pub back: String,
    /// Text handed to speech playback, whatever side is showing.
    pub canonical_text: String,
    /// True when the front shows the native (primary) side.
    pub direction_flag: bool,
}
