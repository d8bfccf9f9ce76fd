//! Configuration for the explorer.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use wordspace_dataset::loader::DEFAULT_CACHE_ENTRIES;
use wordspace_dataset::{DatasetSelection, ModelFamily, ModelId, ReductionMethod};
use wordspace_scene::{ColorMode, SceneConfig};

use crate::error::{ExplorerError, Result};

/// Configuration for the explorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Where dataset files are fetched from.
    pub source: SourceConfig,

    /// Picking, framing and animation tuning.
    pub scene: SceneConfig,

    /// Maximum decoded resources cached per kind; zero disables caching.
    pub cache_max_entries: usize,
}

impl ExplorerConfig {
    /// Create a configuration reading from `source`, with defaults
    /// elsewhere.
    pub fn new(source: SourceConfig) -> Self {
        Self {
            source,
            scene: SceneConfig::default(),
            cache_max_entries: DEFAULT_CACHE_ENTRIES,
        }
    }

    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| ExplorerError::Config(e.to_string()))
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Set the scene configuration.
    pub fn with_scene(mut self, scene: SceneConfig) -> Self {
        self.scene = scene;
        self
    }

    /// Set the cache size.
    pub fn with_cache_max_entries(mut self, max_entries: usize) -> Self {
        self.cache_max_entries = max_entries;
        self
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self::new(SourceConfig::default())
    }
}

/// Where dataset files are hosted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceConfig {
    /// Static HTTP hosting; resource paths are joined onto `base_url`.
    Http { base_url: String },
    /// A local directory laid out like the static hosting.
    Directory { root: PathBuf },
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::Http {
            base_url: "http://localhost:3000/data/".to_string(),
        }
    }
}

/// Inbound view settings from the UI layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSettings {
    pub model: ModelId,
    pub word_count: usize,

    /// Ignored by token-model families.
    #[serde(default)]
    pub reduction: Option<ReductionMethod>,

    #[serde(default = "default_true")]
    pub use_cluster_colors: bool,

    #[serde(default)]
    pub show_cluster_edges: bool,
}

fn default_true() -> bool {
    true
}

impl ViewSettings {
    pub fn new(model: ModelId, word_count: usize) -> Self {
        Self {
            model,
            word_count,
            reduction: None,
            use_cluster_colors: true,
            show_cluster_edges: false,
        }
    }

    pub fn with_reduction(mut self, reduction: ReductionMethod) -> Self {
        self.reduction = Some(reduction);
        self
    }

    pub fn with_cluster_colors(mut self, enabled: bool) -> Self {
        self.use_cluster_colors = enabled;
        self
    }

    pub fn with_cluster_edges(mut self, enabled: bool) -> Self {
        self.show_cluster_edges = enabled;
        self
    }

    /// The dataset these settings select.
    pub fn selection(&self) -> DatasetSelection {
        DatasetSelection {
            model: self.model.clone(),
            word_count: self.word_count,
            reduction: self.reduction,
        }
    }

    pub fn color_mode(&self) -> ColorMode {
        ColorMode::from_cluster_toggle(self.use_cluster_colors)
    }
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self::new(ModelId::new(ModelFamily::Glove, "50d"), 1000)
            .with_reduction(ReductionMethod::Pca)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_directory_source() {
        let config = ExplorerConfig::from_toml_str(
            r#"
            cache_max_entries = 2

            [source]
            kind = "directory"
            root = "/srv/embeddings"

            [scene]
            pick_threshold = 0.08
            "#,
        )
        .unwrap();

        assert_eq!(
            config.source,
            SourceConfig::Directory {
                root: PathBuf::from("/srv/embeddings")
            }
        );
        assert_eq!(config.cache_max_entries, 2);
        assert_eq!(config.scene.pick_threshold, 0.08);
        assert_eq!(config.scene.animation_ms, 1000);
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(ExplorerConfig::from_toml_str("").unwrap(), ExplorerConfig::default());
    }

    #[test]
    fn test_invalid_document() {
        let err = ExplorerConfig::from_toml_str("source = 3").unwrap_err();
        assert!(matches!(err, ExplorerError::Config(_)));
    }

    #[test]
    fn test_view_settings_from_json() {
        let settings: ViewSettings =
            serde_json::from_str(r#"{"model": "gpt2", "word_count": 500}"#).unwrap();

        assert_eq!(settings.model.family(), ModelFamily::Gpt2);
        assert!(settings.use_cluster_colors);
        assert!(!settings.show_cluster_edges);
        assert_eq!(
            settings.selection().resource_path().unwrap(),
            "gpt2/base/gpt2_base_500.json.gz"
        );
    }
}
