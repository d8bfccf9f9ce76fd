//! # Scene
//!
//! Interactive state of an embedding point cloud: colors, edges, picking,
//! hover/search highlighting and camera refocus.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          SceneState                             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  pointer / touch ──► PointCloud::pick ──► HighlightState        │
//! │                            ▲                   │                │
//! │                            │                   ▼                │
//! │  Camera ◄── CameraAnimator ◄── focus_word   colors / markers    │
//! │     │                                          │                │
//! │     └──────────────► frame() ──────────────► Tooltip            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The scene never renders. Hosts read the color buffer, edge segments,
//! markers and tooltip after each input event or frame and draw them.

pub mod animation;
pub mod camera;
pub mod cloud;
pub mod config;
pub mod edges;
pub mod focus;
pub mod highlight;
pub mod overlay;
pub mod palette;
pub mod state;
pub mod tooltip;
pub mod touch;

pub use animation::{
    AnimationStep, AnimationToken, CameraAnimation, CameraAnimator, Clock, ManualClock,
    SystemClock, ease_out_cubic,
};
pub use camera::{Camera, Projection, Ray, Viewport};
pub use cloud::PointCloud;
pub use config::{CameraConfig, SceneConfig};
pub use edges::{EDGE_OPACITY, EdgeSegment, build_edge_segments};
pub use focus::WordFocus;
pub use highlight::{HighlightPhase, HighlightState};
pub use overlay::{AnalogyOverlay, OverlayPoint, OverlayRole, OverlaySegment};
pub use palette::{Color, ColorMode, compute_colors, point_color};
pub use state::{SceneState, SearchOutcome};
pub use tooltip::{Marker, MarkerKind, Tooltip};
pub use touch::TouchTracker;
