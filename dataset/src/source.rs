//! Resource sources.
//!
//! Datasets are static files; a source only knows how to turn a relative
//! resource path into bytes. Decompression and parsing happen elsewhere.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, info};
use url::Url;

use crate::error::{DatasetError, Result};

/// Trait for places datasets can be fetched from.
#[async_trait]
pub trait ResourceSource: Send + Sync {
    /// Get the name of this source.
    fn name(&self) -> &str;

    /// Fetch the raw bytes stored at `path`.
    async fn fetch(&self, path: &str) -> Result<Vec<u8>>;
}

/// Static file server reached over HTTP.
pub struct HttpSource {
    /// Base URL every resource path is joined onto.
    base_url: Url,

    /// HTTP client.
    client: reqwest::Client,
}

impl HttpSource {
    /// Create a new HTTP source.
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: Self::directory_url(base_url)?,
            client: reqwest::Client::new(),
        })
    }

    /// Use a preconfigured client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Ensure the base URL ends with `/` so joins append instead of replace.
    fn directory_url(base_url: &str) -> Result<Url> {
        if base_url.ends_with('/') {
            Ok(Url::parse(base_url)?)
        } else {
            Ok(Url::parse(&format!("{base_url}/"))?)
        }
    }
}

#[async_trait]
impl ResourceSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self, path: &str) -> Result<Vec<u8>> {
        let url = self.base_url.join(path.trim_start_matches('/'))?;

        debug!("Fetching resource: {url}");

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(DatasetError::Status {
                path: path.to_string(),
                status: response.status().as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        info!("Fetched {path} ({} bytes)", bytes.len());

        Ok(bytes.to_vec())
    }
}

/// Local directory laid out like the static file server.
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Create a new directory source.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ResourceSource for DirectorySource {
    fn name(&self) -> &str {
        "directory"
    }

    async fn fetch(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.root.join(path.trim_start_matches('/'));

        debug!("Reading resource: {}", full_path.display());

        let bytes = tokio::fs::read(&full_path).await?;
        info!("Read {path} ({} bytes)", bytes.len());

        Ok(bytes)
    }
}
