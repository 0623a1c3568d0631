//! Error types for flipdeck-core.

use crate::screen::Placeholder;
use crate::types::Locator;
use thiserror::Error;

/// Result type alias using LoadError.
pub type Result<T> = std::result::Result<T, LoadError>;

/// Failure reported by a [`Fetch`](crate::loader::Fetch) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("status {0}")]
    Status(u16),

    #[error("{0}")]
    Transport(String),
}

/// Errors that abort a dataset load.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to fetch {locator}: {cause}")]
    Transport {
        locator: Locator,
        #[source]
        cause: FetchError,
    },

    #[error("invalid card data in {locator}: {reason}")]
    Decode { locator: Locator, reason: String },

    #[error("dataset {dataset} has no cards")]
    EmptyDataset { dataset: String },
}

impl LoadError {
    /// Placeholder shown to the user when a reload ends with this error.
    pub fn placeholder(&self) -> Placeholder {
        match self {
            Self::Transport { .. } | Self::Decode { .. } => Placeholder::TransportFailure,
            Self::EmptyDataset { .. } => Placeholder::EmptyDataset,
        }
    }
}

/// Errors constructing a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("a session needs at least one card")]
    NoCards,
}

/// Errors validating the dataset catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("catalog has no datasets")]
    NoDatasets,

    #[error("dataset {id} has no sources")]
    NoSources { id: String },

    #[error("duplicate dataset id {id}")]
    DuplicateId { id: String },
}

/// Errors persisting the selected dataset.
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("preference io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("preference encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_and_decode_map_to_transport_placeholder() {
        let transport = LoadError::Transport {
            locator: Locator::new("unit1.json"),
            cause: FetchError::Status(404),
        };
        let decode = LoadError::Decode {
            locator: Locator::new("unit1.json"),
            reason: "expected an array".to_string(),
        };
        assert_eq!(transport.placeholder(), Placeholder::TransportFailure);
        assert_eq!(decode.placeholder(), Placeholder::TransportFailure);
    }

    #[test]
    fn empty_dataset_maps_to_empty_placeholder() {
        let error = LoadError::EmptyDataset {
            dataset: "unit2".to_string(),
        };
        assert_eq!(error.placeholder(), Placeholder::EmptyDataset);
    }

    #[test]
    fn transport_display_names_locator_and_status() {
        let error = LoadError::Transport {
            locator: Locator::new("unit2.json"),
            cause: FetchError::Status(500),
        };
        assert_eq!(error.to_string(), "failed to fetch unit2.json: status 500");
    }
}
