//! # Explorer
//!
//! Entry point for hosts embedding the wordspace visualization. The
//! explorer combines:
//!
//! - **Dataset loading**: Reduced 3D datasets and full-dimension vectors
//! - **Scene**: Picking, highlighting, search focus and camera animation
//! - **Analogies**: `a - b + c` queries with a scene overlay
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          Explorer                               │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  ViewSettings ──► DatasetLoader ──► apply (ticket check)        │
//! │                        │                     │                  │
//! │                        ▼                     ▼                  │
//! │                   VectorTable           SceneState ◄── input    │
//! │                        │                     ▲                  │
//! │                        ▼                     │                  │
//! │                    analogize ──────► AnalogyOverlay             │
//! │                                                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use wordspace_explorer::{Explorer, ExplorerConfig, WordFocus};
//!
//! let mut explorer = Explorer::new(ExplorerConfig::load("wordspace.toml")?)?;
//! explorer.load_dataset().await;
//! explorer.load_vectors().await;
//!
//! explorer.focus_word("queen");
//! let result = explorer.calculate("king", "man", "woman")?;
//! ```

pub mod config;
pub mod engine;
pub mod error;

pub use config::{ExplorerConfig, SourceConfig, ViewSettings};
pub use engine::{ApplyOutcome, Explorer, ExplorerBuilder, ExplorerStats, SettingsChange};
pub use error::{ExplorerError, Result};

// Re-export from dependencies for convenience
pub use wordspace_dataset::{ModelId, ReductionMethod};
pub use wordspace_embeddings::{AnalogyError, AnalogyResult, Operand};
pub use wordspace_scene::{SceneConfig, SceneState, SearchOutcome, Tooltip, WordFocus};
