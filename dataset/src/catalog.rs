//! Model catalog and resource path rules.
//!
//! Word families (`glove`, `word2vec`, `fasttext`) are published per
//! reduction method; the token family (`gpt2`) has a single projection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DatasetError;

/// A family of pretrained embeddings sharing a naming scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelFamily {
    Glove,
    #[serde(rename = "word2vec")]
    Word2Vec,
    #[serde(rename = "fasttext")]
    FastText,
    Gpt2,
}

impl ModelFamily {
    /// Folder and file prefix used in resource paths.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Glove => "glove",
            Self::Word2Vec => "word2vec",
            Self::FastText => "fasttext",
            Self::Gpt2 => "gpt2",
        }
    }

    /// Whether datasets of this family are published per reduction method.
    pub fn uses_reduction(self) -> bool {
        !matches!(self, Self::Gpt2)
    }

    /// Variant used when the model id does not name one.
    fn default_variant(self) -> Option<&'static str> {
        match self {
            Self::Gpt2 => Some("base"),
            _ => None,
        }
    }
}

impl FromStr for ModelFamily {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "glove" => Ok(Self::Glove),
            "word2vec" => Ok(Self::Word2Vec),
            "fasttext" => Ok(Self::FastText),
            "gpt2" => Ok(Self::Gpt2),
            other => Err(DatasetError::UnknownModel(other.to_string())),
        }
    }
}

/// Offline projection used to bring vectors down to 3D.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReductionMethod {
    #[default]
    Pca,
    Umap,
    Tsne,
}

impl ReductionMethod {
    pub fn slug(self) -> &'static str {
        match self {
            Self::Pca => "pca",
            Self::Umap => "umap",
            Self::Tsne => "tsne",
        }
    }
}

impl FromStr for ReductionMethod {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pca" => Ok(Self::Pca),
            "umap" => Ok(Self::Umap),
            "tsne" | "t-sne" => Ok(Self::Tsne),
            other => Err(DatasetError::UnknownReduction(other.to_string())),
        }
    }
}

/// A model identifier such as `glove-50d` or `gpt2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModelId {
    family: ModelFamily,
    variant: String,
}

impl ModelId {
    pub fn new(family: ModelFamily, variant: impl Into<String>) -> Self {
        Self {
            family,
            variant: variant.into(),
        }
    }

    pub fn family(&self) -> ModelFamily {
        self.family
    }

    /// Dimension or variant tag, e.g. `50d`.
    pub fn variant(&self) -> &str {
        &self.variant
    }

    /// Path of the full-dimension vector table for this model.
    pub fn vectors_path(&self) -> String {
        let family = self.family.slug();
        let variant = &self.variant;
        format!("{family}/{variant}/{family}_{variant}_vectors.json.gz")
    }
}

impl FromStr for ModelId {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        let (family, variant) = match s.split_once('-') {
            Some((family, variant)) if !variant.is_empty() => (family.parse()?, variant),
            Some(_) => return Err(DatasetError::UnknownModel(s.clone())),
            None => {
                let family: ModelFamily = s.parse()?;
                let variant = family
                    .default_variant()
                    .ok_or_else(|| DatasetError::UnknownModel(s.clone()))?;
                (family, variant)
            }
        };
        Ok(Self::new(family, variant))
    }
}

impl TryFrom<String> for ModelId {
    type Error = DatasetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ModelId> for String {
    fn from(value: ModelId) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.family.default_variant() {
            Some(default) if default == self.variant => write!(f, "{}", self.family.slug()),
            _ => write!(f, "{}-{}", self.family.slug(), self.variant),
        }
    }
}

/// What the user picked: model, vocabulary size and projection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetSelection {
    pub model: ModelId,
    pub word_count: usize,
    #[serde(default)]
    pub reduction: Option<ReductionMethod>,
}

impl DatasetSelection {
    pub fn new(model: ModelId, word_count: usize) -> Self {
        Self {
            model,
            word_count,
            reduction: None,
        }
    }

    pub fn with_reduction(mut self, reduction: ReductionMethod) -> Self {
        self.reduction = Some(reduction);
        self
    }

    /// Resolve the dataset resource path.
    ///
    /// Word families fall back to PCA when no reduction is selected; the
    /// token family ignores the reduction entirely.
    pub fn resource_path(&self) -> Result<String, DatasetError> {
        if self.word_count == 0 {
            return Err(DatasetError::InvalidWordCount);
        }

        let family = self.model.family();
        let slug = family.slug();
        let variant = self.model.variant();
        let count = self.word_count;

        if family.uses_reduction() {
            let reduction = self.reduction.unwrap_or_default().slug();
            Ok(format!(
                "{slug}/{variant}/{slug}_{variant}_{count}_{reduction}.json.gz"
            ))
        } else {
            Ok(format!("{slug}/{variant}/{slug}_{variant}_{count}.json.gz"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_model_ids() {
        let glove: ModelId = "GloVe-50d".parse().unwrap();
        assert_eq!(glove.family(), ModelFamily::Glove);
        assert_eq!(glove.variant(), "50d");
        assert_eq!(glove.to_string(), "glove-50d");

        let gpt2: ModelId = "gpt2".parse().unwrap();
        assert_eq!(gpt2.variant(), "base");
        assert_eq!(gpt2.to_string(), "gpt2");

        assert!("glove".parse::<ModelId>().is_err());
        assert!("bert-base".parse::<ModelId>().is_err());
        assert!("glove-".parse::<ModelId>().is_err());
    }

    #[test]
    fn test_word_family_paths() {
        let selection = DatasetSelection::new("glove-100d".parse().unwrap(), 5000)
            .with_reduction(ReductionMethod::Umap);
        assert_eq!(
            selection.resource_path().unwrap(),
            "glove/100d/glove_100d_5000_umap.json.gz"
        );

        let default_reduction = DatasetSelection::new("word2vec-300d".parse().unwrap(), 1000);
        assert_eq!(
            default_reduction.resource_path().unwrap(),
            "word2vec/300d/word2vec_300d_1000_pca.json.gz"
        );
    }

    #[test]
    fn test_token_family_ignores_reduction() {
        let selection = DatasetSelection::new("gpt2".parse().unwrap(), 2000)
            .with_reduction(ReductionMethod::Tsne);
        assert_eq!(
            selection.resource_path().unwrap(),
            "gpt2/base/gpt2_base_2000.json.gz"
        );
    }

    #[test]
    fn test_vectors_path() {
        let model: ModelId = "fasttext-300d".parse().unwrap();
        assert_eq!(
            model.vectors_path(),
            "fasttext/300d/fasttext_300d_vectors.json.gz"
        );
    }

    #[test]
    fn test_zero_word_count_rejected() {
        let selection = DatasetSelection::new("glove-50d".parse().unwrap(), 0);
        assert!(matches!(
            selection.resource_path(),
            Err(DatasetError::InvalidWordCount)
        ));
    }

    #[test]
    fn test_selection_deserializes_from_strings() {
        let selection: DatasetSelection =
            serde_json::from_str(r#"{"model": "glove-50d", "word_count": 1000, "reduction": "tsne"}"#)
                .unwrap();
        assert_eq!(selection.reduction, Some(ReductionMethod::Tsne));
        assert_eq!(selection.model.to_string(), "glove-50d");
    }
}
