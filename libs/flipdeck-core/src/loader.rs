//! Loading a dataset's sources into raw pairs and cards.

use crate::error::{FetchError, LoadError, Result};
use crate::factory::build_cards;
use crate::normalize::{normalize_records, BlankRecords, FieldAliases};
use crate::types::{Card, DatasetDescriptor, Locator, RawPair};
use async_trait::async_trait;
use serde_json::Value;

/// Fetches the raw body behind a locator.
///
/// Implementations must not answer from a cache: datasets can change between
/// reloads.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, locator: &Locator) -> std::result::Result<String, FetchError>;
}

/// Resolves dataset descriptors into raw pairs.
pub struct CardSetLoader<F> {
    fetcher: F,
    aliases: FieldAliases,
    blanks: BlankRecords,
}

impl<F: Fetch> CardSetLoader<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            aliases: FieldAliases::default(),
            blanks: BlankRecords::default(),
        }
    }

    pub fn with_aliases(mut self, aliases: FieldAliases) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn with_blank_records(mut self, blanks: BlankRecords) -> Self {
        self.blanks = blanks;
        self
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fetch every source in order and normalize the concatenated records.
    ///
    /// Sources are fetched one after another; the first failure aborts the
    /// load and discards whatever earlier sources returned.
    pub async fn load(&self, descriptor: &DatasetDescriptor) -> Result<Vec<RawPair>> {
        let mut records = Vec::new();

        for locator in &descriptor.sources {
            let body = self
                .fetcher
                .fetch(locator)
                .await
                .map_err(|cause| LoadError::Transport {
                    locator: locator.clone(),
                    cause,
                })?;

            let batch: Vec<Value> =
                serde_json::from_str(&body).map_err(|e| LoadError::Decode {
                    locator: locator.clone(),
                    reason: e.to_string(),
                })?;

            tracing::debug!(%locator, records = batch.len(), "fetched source");
            records.extend(batch);
        }

        Ok(normalize_records(&records, &self.aliases, self.blanks))
    }

    /// Load, then shuffle and assign directions. An empty result is an error.
    pub async fn load_cards(&self, descriptor: &DatasetDescriptor) -> Result<Vec<Card>> {
        let pairs = self.load(descriptor).await?;
        if pairs.is_empty() {
            return Err(LoadError::EmptyDataset {
                dataset: descriptor.id.clone(),
            });
        }

        let mut rng = rand::rng();
        Ok(build_cards(&pairs, &mut rng))
    }
}
