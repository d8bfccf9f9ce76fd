//! # Dataset
//!
//! Loading of pre-reduced word embedding datasets for the wordspace
//! explorer.
//!
//! ## Features
//!
//! - **Catalog**: Deterministic resource paths per model, word count and
//!   reduction method
//! - **Sources**: Static HTTP hosting or a local data directory
//! - **Decoding**: Gzip sniffing, tolerant JSON entry parsing
//! - **Centering**: Every dataset is shifted to a zero-mean point cloud
//! - **Supersession**: Request tickets so stale loads are never applied
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Dataset Loader                               │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  DatasetSelection ──► ResourceSource ──► decode ──► Dataset     │
//! │       │                                              │          │
//! │       ▼                                              ▼          │
//! │  RequestGeneration ─────────────► CompletedLoad   LoadCache     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod cache;
pub mod catalog;
pub mod decode;
pub mod error;
pub mod generation;
pub mod loader;
pub mod record;
pub mod source;

pub use cache::LoadCache;
pub use catalog::{DatasetSelection, ModelFamily, ModelId, ReductionMethod};
pub use decode::RawPoint;
pub use error::{DatasetError, Result};
pub use generation::{CompletedLoad, LoadTicket, PendingLoad, RequestGeneration};
pub use loader::DatasetLoader;
pub use record::{Dataset, PointRecord, UNCLUSTERED};
pub use source::{DirectorySource, HttpSource, ResourceSource};
