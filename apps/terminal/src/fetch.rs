//! Fetching dataset sources over HTTP or from disk.

use async_trait::async_trait;
use flipdeck_core::{Fetch, FetchError, Locator};
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::{Client, Url};
use std::path::PathBuf;

fn is_http(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// Where relative locators are resolved from.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceBase {
    Url(Url),
    Dir(PathBuf),
}

/// A locator resolved against the base.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    Http(Url),
    File(PathBuf),
}

impl SourceBase {
    /// Parse an `http(s)://` URL or a directory path. Returns the offending
    /// value on failure.
    pub fn parse(value: &str) -> Result<Self, String> {
        if !is_http(value) {
            return Ok(Self::Dir(PathBuf::from(value)));
        }

        let mut url = Url::parse(value).map_err(|_| value.to_string())?;
        // Without a trailing slash, join would replace the last segment.
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(Self::Url(url))
    }

    pub fn resolve(&self, locator: &Locator) -> Result<Resolved, FetchError> {
        let raw = locator.as_str();
        if is_http(raw) {
            return Url::parse(raw)
                .map(Resolved::Http)
                .map_err(|e| FetchError::Transport(format!("invalid url {}: {}", raw, e)));
        }

        match self {
            Self::Url(base) => base
                .join(raw)
                .map(Resolved::Http)
                .map_err(|e| FetchError::Transport(format!("invalid url {}: {}", raw, e))),
            Self::Dir(dir) => Ok(Resolved::File(dir.join(raw))),
        }
    }
}

/// Fetcher for the terminal viewer. Never answers from a cache.
pub struct SourceFetcher {
    client: Client,
    base: SourceBase,
}

impl SourceFetcher {
    pub fn new(base: SourceBase) -> Self {
        Self::with_client(Client::new(), base)
    }

    pub fn with_client(client: Client, base: SourceBase) -> Self {
        Self { client, base }
    }

    async fn fetch_http(&self, url: Url) -> Result<String, FetchError> {
        let resp = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-cache, no-store")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(FetchError::Status(resp.status().as_u16()));
        }

        resp.text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))
    }
}

#[async_trait]
impl Fetch for SourceFetcher {
    async fn fetch(&self, locator: &Locator) -> Result<String, FetchError> {
        match self.base.resolve(locator)? {
            Resolved::Http(url) => self.fetch_http(url).await,
            Resolved::File(path) => tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| FetchError::Transport(format!("{}: {}", path.display(), e))),
        }
    }
}
