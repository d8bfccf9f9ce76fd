//! Dataset loader.
//!
//! Resolves a selection to a resource path, fetches it through a
//! [`ResourceSource`], decodes it and centers it. Each request is issued a
//! [`LoadTicket`]; callers must check [`DatasetLoader::is_current_dataset`]
//! (or the vectors counterpart) before applying a result, since a newer
//! request may have been issued while this one was in flight.

use std::sync::Arc;

use tracing::{debug, info, warn};
use wordspace_embeddings::VectorTable;

use crate::cache::LoadCache;
use crate::catalog::{DatasetSelection, ModelId};
use crate::decode::{decode_text, parse_points};
use crate::error::Result;
use crate::generation::{LoadTicket, PendingLoad, RequestGeneration};
use crate::record::Dataset;
use crate::source::ResourceSource;

/// Default number of decoded resources kept per kind.
pub const DEFAULT_CACHE_ENTRIES: usize = 8;

/// Loads reduced datasets and full-dimension vector tables.
pub struct DatasetLoader {
    source: Arc<dyn ResourceSource>,

    datasets: LoadCache<Dataset>,
    vectors: LoadCache<VectorTable>,

    dataset_generation: RequestGeneration,
    vectors_generation: RequestGeneration,
}

impl DatasetLoader {
    /// Create a loader over `source` with the default cache size.
    pub fn new(source: Arc<dyn ResourceSource>) -> Self {
        Self::with_cache_entries(source, DEFAULT_CACHE_ENTRIES)
    }

    /// Create a loader keeping up to `max_entries` decoded resources per
    /// kind; zero disables caching.
    pub fn with_cache_entries(source: Arc<dyn ResourceSource>, max_entries: usize) -> Self {
        Self {
            source,
            datasets: LoadCache::new(max_entries),
            vectors: LoadCache::new(max_entries),
            dataset_generation: RequestGeneration::new(),
            vectors_generation: RequestGeneration::new(),
        }
    }

    /// Name of the underlying source.
    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Issue a dataset request. The ticket is taken now, so any request
    /// issued earlier is superseded even if it resolves later.
    pub fn request_dataset(self: &Arc<Self>, selection: DatasetSelection) -> PendingLoad<Dataset> {
        let ticket = self.dataset_generation.advance();
        let path = selection.resource_path().unwrap_or_default();
        debug!("Dataset request {ticket}: {path}");

        let loader = Arc::clone(self);
        PendingLoad::new(
            ticket,
            path,
            Box::pin(async move { loader.load_dataset(&selection).await }),
        )
    }

    /// Issue a full-vector request for `model`.
    pub fn request_vectors(self: &Arc<Self>, model: ModelId) -> PendingLoad<VectorTable> {
        let ticket = self.vectors_generation.advance();
        let path = model.vectors_path();
        debug!("Vector request {ticket}: {path}");

        let loader = Arc::clone(self);
        PendingLoad::new(
            ticket,
            path,
            Box::pin(async move { loader.load_vectors(&model).await }),
        )
    }

    /// Whether `ticket` is the newest dataset request.
    pub fn is_current_dataset(&self, ticket: LoadTicket) -> bool {
        self.dataset_generation.is_current(ticket)
    }

    /// Whether `ticket` is the newest vector request.
    pub fn is_current_vectors(&self, ticket: LoadTicket) -> bool {
        self.vectors_generation.is_current(ticket)
    }

    /// Fetch, decode and center a dataset, bypassing request generations.
    pub async fn load_dataset(&self, selection: &DatasetSelection) -> Result<Arc<Dataset>> {
        let path = selection.resource_path()?;

        if let Some(dataset) = self.datasets.get(&path).await {
            debug!("Dataset cache hit: {path}");
            return Ok(dataset);
        }

        let bytes = self.source.fetch(&path).await.inspect_err(|e| {
            warn!("Failed to fetch {path} from {}: {e}", self.source.name());
        })?;
        let text = decode_text(&path, bytes)?;
        let dataset = Arc::new(Dataset::from_raw(parse_points(&path, &text)?));

        info!("Loaded dataset {path} with {} points", dataset.len());
        self.datasets.put(&path, Arc::clone(&dataset)).await;

        Ok(dataset)
    }

    /// Fetch and decode the full-dimension vector table for `model`.
    pub async fn load_vectors(&self, model: &ModelId) -> Result<Arc<VectorTable>> {
        let path = model.vectors_path();

        if let Some(table) = self.vectors.get(&path).await {
            debug!("Vector cache hit: {path}");
            return Ok(table);
        }

        let bytes = self.source.fetch(&path).await.inspect_err(|e| {
            warn!("Failed to fetch {path} from {}: {e}", self.source.name());
        })?;
        let text = decode_text(&path, bytes)?;
        let table = Arc::new(VectorTable::from_json_str(&text)?);

        info!("Loaded {} vectors for {model}", table.len());
        self.vectors.put(&path, Arc::clone(&table)).await;

        Ok(table)
    }

    /// Drop every cached resource.
    pub async fn clear_cache(&self) {
        self.datasets.clear().await;
        self.vectors.clear().await;
    }
}
