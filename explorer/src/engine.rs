//! Explorer implementation.

use std::sync::Arc;

use tracing::{debug, info, warn};
use wordspace_dataset::{
    CompletedLoad, Dataset, DatasetError, DatasetLoader, DirectorySource, HttpSource,
    LoadTicket, PendingLoad, ResourceSource,
};
use wordspace_embeddings::{AnalogyResult, SimilarityResult, VectorTable, analogize, normalize_word};
use wordspace_scene::{AnalogyOverlay, Clock, SceneState, SearchOutcome, SystemClock, WordFocus};

use crate::config::{ExplorerConfig, SourceConfig, ViewSettings};
use crate::error::{ExplorerError, Result};

/// What became of a completed load.
#[derive(Debug)]
pub enum ApplyOutcome {
    /// The result was applied.
    Applied { entries: usize },
    /// A newer request was issued; the result was dropped.
    Superseded,
    /// The load failed. The previous state is kept.
    Unavailable(DatasetError),
}

impl ApplyOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Loads requested by a settings change.
#[derive(Debug, Default)]
pub struct SettingsChange {
    pub dataset: Option<PendingLoad<Dataset>>,
    pub vectors: Option<PendingLoad<VectorTable>>,
}

/// Coordinates view settings, dataset loading, the scene and analogy
/// queries.
///
/// Loads are split into a synchronous request, which issues a ticket, and
/// an apply step, which drops results whose ticket is no longer current.
/// Hosts may run the pending futures wherever they like; results are only
/// applied through `&mut self`.
pub struct Explorer {
    /// Configuration.
    config: ExplorerConfig,

    /// Dataset and vector loader.
    loader: Arc<DatasetLoader>,

    /// Scene state.
    scene: SceneState,

    /// Current view settings.
    settings: ViewSettings,

    /// Full-dimension vectors for the current model.
    vectors: Option<Arc<VectorTable>>,

    /// Outstanding dataset request, if any.
    pending_dataset: Option<LoadTicket>,

    /// Outstanding vector request, if any.
    pending_vectors: Option<LoadTicket>,

    /// Result of the last successful calculation.
    last_analogy: Option<AnalogyResult>,
}

impl Explorer {
    /// Create a new explorer builder.
    pub fn builder() -> ExplorerBuilder {
        ExplorerBuilder::new()
    }

    /// Create an explorer reading from the source named in `config`.
    pub fn new(config: ExplorerConfig) -> Result<Self> {
        Self::builder().with_config(config).build()
    }

    fn from_parts(
        config: ExplorerConfig,
        source: Arc<dyn ResourceSource>,
        clock: Arc<dyn Clock>,
        settings: ViewSettings,
    ) -> Self {
        info!("Initializing explorer with source {}", source.name());

        let loader = Arc::new(DatasetLoader::with_cache_entries(
            source,
            config.cache_max_entries,
        ));
        let mut scene = SceneState::new(config.scene.clone(), clock)
            .with_color_mode(settings.color_mode());
        scene.set_edges_visible(settings.show_cluster_edges);

        Self {
            config,
            loader,
            scene,
            settings,
            vectors: None,
            pending_dataset: None,
            pending_vectors: None,
            last_analogy: None,
        }
    }

    // ------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------

    /// Apply new view settings. Toggles take effect immediately; a changed
    /// model, word count or reduction issues a dataset request, and a
    /// changed model also issues a vector request.
    pub fn apply_settings(&mut self, settings: ViewSettings) -> SettingsChange {
        let previous = std::mem::replace(&mut self.settings, settings);
        let mut change = SettingsChange::default();

        if previous.use_cluster_colors != self.settings.use_cluster_colors {
            self.scene.set_color_mode(self.settings.color_mode());
        }
        if previous.show_cluster_edges != self.settings.show_cluster_edges {
            self.scene.set_edges_visible(self.settings.show_cluster_edges);
        }

        if previous.selection() != self.settings.selection() {
            change.dataset = Some(self.request_dataset());
        }
        if previous.model != self.settings.model {
            self.vectors = None;
            self.clear_analogy();
            change.vectors = Some(self.request_vectors());
        }

        change
    }

    pub fn settings(&self) -> &ViewSettings {
        &self.settings
    }

    pub fn set_cluster_colors(&mut self, enabled: bool) {
        self.settings.use_cluster_colors = enabled;
        self.scene.set_color_mode(self.settings.color_mode());
    }

    pub fn set_edges_visible(&mut self, visible: bool) {
        self.settings.show_cluster_edges = visible;
        self.scene.set_edges_visible(visible);
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Request the dataset for the current settings, superseding any
    /// request still in flight.
    pub fn request_dataset(&mut self) -> PendingLoad<Dataset> {
        let pending = self.loader.request_dataset(self.settings.selection());
        self.pending_dataset = Some(pending.ticket());
        pending
    }

    /// Apply a finished dataset load if it is still the newest request.
    pub fn apply_dataset(&mut self, completed: CompletedLoad<Dataset>) -> ApplyOutcome {
        if !self.loader.is_current_dataset(completed.ticket) {
            warn!(
                "Discarding superseded dataset load {} ({})",
                completed.ticket, completed.path
            );
            return ApplyOutcome::Superseded;
        }
        self.pending_dataset = None;

        match completed.result {
            Ok(dataset) => {
                let entries = dataset.len();
                self.scene.apply_dataset(dataset);
                info!("Applied dataset {} with {entries} points", completed.path);
                ApplyOutcome::Applied { entries }
            }
            Err(e) => {
                warn!("Dataset {} unavailable: {e}", completed.path);
                ApplyOutcome::Unavailable(e)
            }
        }
    }

    /// Request and apply the dataset for the current settings.
    pub async fn load_dataset(&mut self) -> ApplyOutcome {
        let completed = self.request_dataset().resolve().await;
        self.apply_dataset(completed)
    }

    /// Request the vector table for the current model.
    pub fn request_vectors(&mut self) -> PendingLoad<VectorTable> {
        let pending = self.loader.request_vectors(self.settings.model.clone());
        self.pending_vectors = Some(pending.ticket());
        pending
    }

    /// Apply a finished vector load if it is still the newest request.
    pub fn apply_vectors(&mut self, completed: CompletedLoad<VectorTable>) -> ApplyOutcome {
        if !self.loader.is_current_vectors(completed.ticket) {
            warn!(
                "Discarding superseded vector load {} ({})",
                completed.ticket, completed.path
            );
            return ApplyOutcome::Superseded;
        }
        self.pending_vectors = None;

        match completed.result {
            Ok(table) => {
                let entries = table.len();
                self.vectors = Some(table);
                info!("Applied {entries} vectors from {}", completed.path);
                ApplyOutcome::Applied { entries }
            }
            Err(e) => {
                warn!("Vectors {} unavailable: {e}", completed.path);
                ApplyOutcome::Unavailable(e)
            }
        }
    }

    /// Request and apply the vector table for the current model.
    pub async fn load_vectors(&mut self) -> ApplyOutcome {
        let completed = self.request_vectors().resolve().await;
        self.apply_vectors(completed)
    }

    /// Whether a dataset request is still outstanding.
    pub fn is_loading(&self) -> bool {
        self.pending_dataset.is_some()
    }

    /// Whether a vector request is still outstanding.
    pub fn is_loading_vectors(&self) -> bool {
        self.pending_vectors.is_some()
    }

    /// Drop every cached resource.
    pub async fn clear_cache(&self) {
        self.loader.clear_cache().await;
    }

    // ------------------------------------------------------------------
    // Analogies
    // ------------------------------------------------------------------

    /// Compute `a - b + c` and publish the result and its overlay. A failed
    /// calculation clears the previous result.
    pub fn calculate(&mut self, a: &str, b: &str, c: &str) -> Result<&AnalogyResult> {
        let Some(table) = self.vectors.clone() else {
            self.clear_analogy();
            return Err(ExplorerError::VectorsUnavailable);
        };

        let result = match analogize(a, b, c, &table) {
            Ok(result) => result,
            Err(e) => {
                debug!("Analogy rejected: {e} (field {})", e.field());
                self.clear_analogy();
                return Err(e.into());
            }
        };

        match &result.closest_word {
            Some(word) => info!(
                "{a} - {b} + {c} = {word} (similarity {:.3})",
                result.similarity
            ),
            None => info!("{a} - {b} + {c} has no nearest word"),
        }

        let overlay = AnalogyOverlay::build([a, b, c], &table, &result);
        self.scene.set_overlay(overlay);
        Ok(self.last_analogy.insert(result))
    }

    pub fn last_analogy(&self) -> Option<&AnalogyResult> {
        self.last_analogy.as_ref()
    }

    fn clear_analogy(&mut self) {
        self.last_analogy = None;
        self.scene.set_overlay(None);
    }

    /// The `k` words closest to `word` by cosine similarity.
    pub fn similar_words(&self, word: &str, k: usize) -> Result<Vec<SimilarityResult>> {
        let table = self.vectors.as_ref().ok_or(ExplorerError::VectorsUnavailable)?;
        let key = normalize_word(word);
        let query = table
            .get(&key)
            .ok_or_else(|| ExplorerError::WordNotFound(key.clone()))?;
        Ok(table.nearest(query, k, &[key.as_str()]))
    }

    pub fn vectors(&self) -> Option<&Arc<VectorTable>> {
        self.vectors.as_ref()
    }

    // ------------------------------------------------------------------
    // Scene access
    // ------------------------------------------------------------------

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    /// Mutable scene access for pointer, touch and frame events.
    pub fn scene_mut(&mut self) -> &mut SceneState {
        &mut self.scene
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// Get explorer statistics.
    pub fn stats(&self) -> ExplorerStats {
        ExplorerStats {
            source: self.loader.source_name().to_string(),
            points: self.scene.cloud().len(),
            edges: self.scene.dataset().map_or(0, |d| d.edge_count()),
            vectors: self.vectors.as_ref().map_or(0, |t| t.len()),
            dimension: self.vectors.as_ref().map_or(0, |t| t.dimension()),
            loading: self.is_loading(),
        }
    }
}

impl WordFocus for Explorer {
    fn vocabulary(&self) -> Vec<String> {
        self.scene.vocabulary()
    }

    fn focus_word(&mut self, label: &str) -> SearchOutcome {
        self.scene.focus_word(label)
    }
}

impl std::fmt::Debug for Explorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Explorer")
            .field("settings", &self.settings)
            .field("scene", &self.scene)
            .field("pending_dataset", &self.pending_dataset)
            .field("pending_vectors", &self.pending_vectors)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Explorer`].
pub struct ExplorerBuilder {
    config: ExplorerConfig,
    source: Option<Arc<dyn ResourceSource>>,
    clock: Option<Arc<dyn Clock>>,
    settings: ViewSettings,
}

impl ExplorerBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            config: ExplorerConfig::default(),
            source: None,
            clock: None,
            settings: ViewSettings::default(),
        }
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: ExplorerConfig) -> Self {
        self.config = config;
        self
    }

    /// Use `source` instead of the one named in the configuration.
    pub fn with_source(mut self, source: Arc<dyn ResourceSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Read frame time from `clock`.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Set the initial view settings.
    pub fn with_settings(mut self, settings: ViewSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Build the explorer. Nothing is loaded until a request is issued.
    pub fn build(self) -> Result<Explorer> {
        let source = match self.source {
            Some(source) => source,
            None => source_from_config(&self.config.source)?,
        };
        let clock: Arc<dyn Clock> = match self.clock {
            Some(clock) => clock,
            None => Arc::new(SystemClock::new()),
        };
        Ok(Explorer::from_parts(self.config, source, clock, self.settings))
    }
}

impl Default for ExplorerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn source_from_config(config: &SourceConfig) -> Result<Arc<dyn ResourceSource>> {
    let source: Arc<dyn ResourceSource> = match config {
        SourceConfig::Http { base_url } => Arc::new(HttpSource::new(base_url)?),
        SourceConfig::Directory { root } => Arc::new(DirectorySource::new(root)),
    };
    Ok(source)
}

/// Statistics about the explorer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerStats {
    /// Name of the resource source.
    pub source: String,

    /// Points in the scene.
    pub points: usize,

    /// Edges materialized from neighbor lists.
    pub edges: usize,

    /// Words in the vector table.
    pub vectors: usize,

    /// Dimension of the vector table.
    pub dimension: usize,

    /// Whether a dataset request is outstanding.
    pub loading: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn directory_explorer(root: &std::path::Path) -> Explorer {
        let config = ExplorerConfig::new(SourceConfig::Directory {
            root: root.to_path_buf(),
        });
        Explorer::new(config).unwrap()
    }

    #[test]
    fn test_builder_with_http_config() {
        let explorer = Explorer::builder().build().unwrap();
        assert_eq!(explorer.stats().points, 0);
        assert!(!explorer.is_loading());
    }

    #[test]
    fn test_invalid_base_url() {
        let config = ExplorerConfig::new(SourceConfig::Http {
            base_url: "not a url".to_string(),
        });
        assert!(matches!(
            Explorer::new(config),
            Err(ExplorerError::Dataset(DatasetError::Url(_)))
        ));
    }

    #[tokio::test]
    async fn test_directory_load() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("glove/50d");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("glove_50d_1000_pca.json.gz"),
            r#"[{"x": 1, "y": 2, "z": 3, "word": "cat"}, {"x": 3, "y": 2, "z": 1, "word": "dog"}]"#,
        )
        .unwrap();

        let mut explorer = directory_explorer(temp_dir.path());
        let outcome = explorer.load_dataset().await;

        assert!(outcome.is_applied());
        assert_eq!(explorer.vocabulary(), vec!["cat", "dog"]);
        let dataset = explorer.scene().dataset().unwrap();
        assert_eq!(dataset.points()[0].position, [-1.0, 0.0, 1.0]);
    }

    #[tokio::test]
    async fn test_missing_vectors_are_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        let mut explorer = directory_explorer(temp_dir.path());

        let outcome = explorer.load_vectors().await;
        assert!(matches!(outcome, ApplyOutcome::Unavailable(DatasetError::Io(_))));
        assert!(matches!(
            explorer.calculate("a", "b", "c"),
            Err(ExplorerError::VectorsUnavailable)
        ));
    }
}
