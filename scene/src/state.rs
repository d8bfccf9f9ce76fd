//! Scene state and the hover/search highlight controller.
//!
//! [`SceneState`] owns everything a frame needs: the loaded dataset, the
//! point buffers, the camera and its animation, edge segments, markers and
//! the tooltip channel. Input handlers mutate it synchronously; the host
//! calls [`SceneState::frame`] once per animation frame.
//!
//! Every color restore re-derives the point's baseline from the current
//! cluster id and [`ColorMode`], so hover, search and mode toggles can
//! overlap without leaving stale colors behind.

use std::sync::Arc;

use glam::{Vec2, Vec3};
use tracing::{debug, info, warn};
use wordspace_dataset::Dataset;

use crate::animation::{AnimationStep, CameraAnimation, CameraAnimator, Clock};
use crate::camera::{Camera, Viewport};
use crate::cloud::PointCloud;
use crate::config::SceneConfig;
use crate::edges::{EdgeSegment, build_edge_segments};
use crate::highlight::{HighlightPhase, HighlightState};
use crate::overlay::AnalogyOverlay;
use crate::palette::{Color, ColorMode, HOVER_COLOR, SEARCH_COLOR, compute_colors, point_color};
use crate::tooltip::{Marker, MarkerKind, Tooltip, tooltip_text};
use crate::touch::TouchTracker;

/// Result of a search request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The label was found and is now the searched point.
    Focused { index: usize },
    /// The label is not in the current dataset; nothing changed.
    NotFound,
    /// The search text was empty; any active search was cleared.
    Cleared,
}

/// Owned state of the embedding scene.
pub struct SceneState {
    config: SceneConfig,
    clock: Arc<dyn Clock>,

    viewport: Viewport,
    camera: Camera,
    animator: CameraAnimator,

    dataset: Option<Arc<Dataset>>,
    cloud: PointCloud,
    color_mode: ColorMode,
    edges: Option<Vec<EdgeSegment>>,

    highlight: HighlightState,
    hover_marker: Option<Marker>,
    search_marker: Option<Marker>,
    tooltip: Tooltip,

    /// Last pointer position over the canvas.
    pointer: Option<Vec2>,
    pointer_pressed: bool,
    touch: TouchTracker,

    overlay: Option<AnalogyOverlay>,
}

impl SceneState {
    pub fn new(config: SceneConfig, clock: Arc<dyn Clock>) -> Self {
        let viewport = Viewport::default();
        Self {
            camera: Camera::from_config(&config.camera, viewport),
            touch: TouchTracker::new(config.touch_tap_slop_px),
            config,
            clock,
            viewport,
            animator: CameraAnimator::new(),
            dataset: None,
            cloud: PointCloud::default(),
            color_mode: ColorMode::default(),
            edges: None,
            highlight: HighlightState::default(),
            hover_marker: None,
            search_marker: None,
            tooltip: Tooltip::hidden(),
            pointer: None,
            pointer_pressed: false,
            overlay: None,
        }
    }

    pub fn with_color_mode(mut self, mode: ColorMode) -> Self {
        self.set_color_mode(mode);
        self
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.set_viewport(viewport);
        self
    }

    // ------------------------------------------------------------------
    // Dataset
    // ------------------------------------------------------------------

    /// Replace the scene contents with `dataset`. Highlights, markers, the
    /// tooltip and any camera animation are reset.
    pub fn apply_dataset(&mut self, dataset: Arc<Dataset>) {
        self.reset_interaction();

        let positions = dataset
            .points()
            .iter()
            .map(|p| Vec3::from_array(p.position))
            .collect();
        let colors = compute_colors(dataset.points().iter().map(|p| p.cluster_id), self.color_mode);
        self.cloud = PointCloud::new(positions, &colors);
        self.dataset = Some(dataset);

        if self.edges.is_some() {
            self.edges = Some(self.build_edges());
        }

        info!(
            "Scene holds {} points, {} edges",
            self.cloud.len(),
            self.edges.as_ref().map_or(0, Vec::len)
        );
    }

    /// Remove the dataset, leaving an empty scene.
    pub fn clear_dataset(&mut self) {
        self.reset_interaction();
        self.cloud = PointCloud::default();
        self.dataset = None;
        if self.edges.is_some() {
            self.edges = Some(Vec::new());
        }
    }

    fn reset_interaction(&mut self) {
        self.highlight = HighlightState::default();
        self.hover_marker = None;
        self.search_marker = None;
        self.tooltip.hide();
        self.pointer_pressed = false;
        self.touch = TouchTracker::new(self.config.touch_tap_slop_px);
        self.animator.cancel();
    }

    pub fn dataset(&self) -> Option<&Arc<Dataset>> {
        self.dataset.as_ref()
    }

    /// Labels in point order.
    pub fn vocabulary(&self) -> Vec<String> {
        self.dataset
            .as_ref()
            .map(|d| d.vocabulary())
            .unwrap_or_default()
    }

    // ------------------------------------------------------------------
    // Colors and edges
    // ------------------------------------------------------------------

    /// Recolor every point for `mode`, keeping active highlights.
    pub fn set_color_mode(&mut self, mode: ColorMode) {
        self.color_mode = mode;
        for index in 0..self.cloud.len() {
            self.refresh_color(index);
        }
        debug!("Color mode set to {mode:?}");
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    pub fn set_edges_visible(&mut self, visible: bool) {
        self.edges = visible.then(|| self.build_edges());
    }

    pub fn edges_visible(&self) -> bool {
        self.edges.is_some()
    }

    /// Current edge segments; empty while edges are hidden.
    pub fn edges(&self) -> &[EdgeSegment] {
        self.edges.as_deref().unwrap_or_default()
    }

    fn build_edges(&self) -> Vec<EdgeSegment> {
        let Some(dataset) = &self.dataset else {
            return Vec::new();
        };
        let cluster_ids: Vec<i32> = dataset.points().iter().map(|p| p.cluster_id).collect();
        let neighbors: Vec<Vec<usize>> = dataset
            .points()
            .iter()
            .map(|p| p.neighbor_indices.clone())
            .collect();
        build_edge_segments(self.cloud.positions(), &cluster_ids, &neighbors)
    }

    /// Baseline color of a point under the current mode.
    fn baseline_color(&self, index: usize) -> Option<Color> {
        let point = self.dataset.as_ref()?.get(index)?;
        Some(point_color(point.cluster_id, self.color_mode))
    }

    /// Paint a point with whatever its current highlight role demands.
    fn refresh_color(&mut self, index: usize) {
        let color = if self.highlight.searched_index == Some(index) {
            Some(SEARCH_COLOR)
        } else if self.highlight.hovered_index == Some(index) {
            Some(HOVER_COLOR)
        } else {
            self.baseline_color(index)
        };
        if let Some(color) = color {
            self.cloud.set_color(index, color);
        }
    }

    // ------------------------------------------------------------------
    // Picking
    // ------------------------------------------------------------------

    /// Point under a normalized device coordinate. Always `None` while a
    /// drag is in progress.
    pub fn pick(&self, ndc: Vec2) -> Option<usize> {
        if self.highlight.is_dragging {
            return None;
        }
        self.cloud.pick(&self.camera, ndc, self.config.pick_threshold)
    }

    /// Point under a pixel coordinate.
    pub fn pick_screen(&self, screen: Vec2) -> Option<usize> {
        self.pick(self.viewport.to_ndc(screen))
    }

    // ------------------------------------------------------------------
    // Pointer and touch input
    // ------------------------------------------------------------------

    pub fn pointer_moved(&mut self, screen: Vec2) {
        self.pointer = Some(screen);

        if self.pointer_pressed && !self.highlight.is_dragging {
            self.begin_drag();
        }
        if self.highlight.is_dragging {
            return;
        }

        self.hover_at(screen);
    }

    pub fn pointer_left(&mut self) {
        self.pointer = None;
        if !self.highlight.is_dragging {
            self.clear_hover();
        }
    }

    pub fn pointer_down(&mut self, screen: Vec2) {
        self.pointer = Some(screen);
        self.pointer_pressed = true;
    }

    pub fn pointer_up(&mut self, screen: Vec2) {
        self.pointer = Some(screen);
        self.pointer_pressed = false;
        self.end_drag();
        self.hover_at(screen);
    }

    pub fn touch_start(&mut self, screen: Vec2) {
        self.touch.start(screen);
    }

    pub fn touch_moved(&mut self, screen: Vec2) {
        if self.touch.moved(screen) && !self.highlight.is_dragging {
            self.begin_drag();
        }
    }

    /// A touch that travelled less than the tap slop acts as a hover at the
    /// tapped position; anything longer was an orbit drag.
    pub fn touch_end(&mut self, screen: Vec2) {
        let tap = self.touch.end(screen);
        self.end_drag();
        if let Some(position) = tap {
            self.pointer = Some(position);
            self.hover_at(position);
        }
    }

    fn begin_drag(&mut self) {
        debug!("Drag started, suppressing hover");
        self.clear_hover();
        self.highlight.is_dragging = true;
    }

    fn end_drag(&mut self) {
        self.highlight.is_dragging = false;
    }

    fn hover_at(&mut self, screen: Vec2) {
        let picked = self.pick_screen(screen);
        self.set_hovered(picked, screen);
    }

    fn set_hovered(&mut self, picked: Option<usize>, pointer: Vec2) {
        let Some(index) = picked else {
            self.clear_hover();
            return;
        };

        // Hovering the searched point never adds a hover highlight.
        if self.highlight.searched_index == Some(index) {
            self.clear_hover();
            return;
        }

        if self.highlight.hovered_index != Some(index) {
            self.clear_hover();
            self.highlight.hovered_index = Some(index);
            self.refresh_color(index);
            if let Some(position) = self.cloud.position(index) {
                self.hover_marker = Some(Marker {
                    kind: MarkerKind::Hover,
                    index,
                    position,
                });
            }
        }

        if self.highlight.searched_index.is_none() {
            self.tooltip = self.hover_tooltip(index, pointer);
        }
    }

    fn clear_hover(&mut self) {
        if let Some(index) = self.highlight.hovered_index.take() {
            self.refresh_color(index);
        }
        self.hover_marker = None;
        if self.highlight.searched_index.is_none() {
            self.tooltip.hide();
        }
    }

    fn hover_tooltip(&self, index: usize, pointer: Vec2) -> Tooltip {
        let (Some(label), Some(position)) = (self.label(index), self.cloud.position(index)) else {
            return Tooltip::hidden();
        };
        if self.on_screen(position).is_none() {
            return Tooltip::hidden();
        }
        Tooltip::shown(tooltip_text(label, position), pointer)
    }

    // ------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------

    /// Search for `label` and focus the camera on it. An empty label clears
    /// the current search.
    pub fn focus_word(&mut self, label: &str) -> SearchOutcome {
        if label.trim().is_empty() {
            self.clear_search();
            return SearchOutcome::Cleared;
        }

        let Some(index) = self.dataset.as_ref().and_then(|d| d.lookup(label)) else {
            warn!("Search word not found: {}", label.trim());
            return SearchOutcome::NotFound;
        };
        let Some(position) = self.cloud.position(index) else {
            return SearchOutcome::NotFound;
        };

        if let Some(previous) = self.highlight.searched_index.take() {
            self.refresh_color(previous);
            self.search_marker = None;
        }
        if self.highlight.hovered_index == Some(index) {
            self.highlight.hovered_index = None;
            self.hover_marker = None;
        }

        self.highlight.searched_index = Some(index);
        self.refresh_color(index);
        self.search_marker = Some(Marker {
            kind: MarkerKind::Search,
            index,
            position,
        });
        self.update_search_tooltip();

        let (camera_position, camera_target) =
            self.camera.framing(position, self.config.focus_distance);
        let animation = CameraAnimation::towards(
            &self.camera,
            camera_position,
            camera_target,
            self.clock.now_ms(),
            self.config.animation_ms,
        );
        self.animator.start(animation);

        info!("Focused search on {} (index {index})", label.trim());
        SearchOutcome::Focused { index }
    }

    /// Clear the search highlight. Hover is re-evaluated at the last pointer
    /// position.
    pub fn clear_search(&mut self) {
        let Some(index) = self.highlight.searched_index.take() else {
            return;
        };
        self.refresh_color(index);
        self.search_marker = None;
        self.tooltip.hide();

        if let Some(pointer) = self.pointer
            && !self.highlight.is_dragging
        {
            self.hover_at(pointer);
        }
    }

    /// Search tooltip, pinned to the point's projection or to the viewport
    /// center when the point is off-screen.
    fn update_search_tooltip(&mut self) {
        let Some(index) = self.highlight.searched_index else {
            return;
        };
        let (Some(label), Some(position)) = (self.label(index), self.cloud.position(index)) else {
            return;
        };
        let anchor = self
            .on_screen(position)
            .unwrap_or_else(|| self.viewport.center());
        self.tooltip = Tooltip::shown(tooltip_text(label, position), anchor);
    }

    // ------------------------------------------------------------------
    // Frame
    // ------------------------------------------------------------------

    /// Advance the camera animation and re-place the tooltip.
    pub fn frame(&mut self) -> AnimationStep {
        let step = self.animator.tick(self.clock.now_ms(), &mut self.camera);

        if self.highlight.searched_index.is_some() {
            self.update_search_tooltip();
        } else if let Some(index) = self.highlight.hovered_index
            && self.tooltip.visible
            && self
                .cloud
                .position(index)
                .and_then(|p| self.on_screen(p))
                .is_none()
        {
            self.tooltip.hide();
        }

        step
    }

    /// Pixel position of a world point, if it is in front of the camera and
    /// inside the viewport.
    fn on_screen(&self, position: Vec3) -> Option<Vec2> {
        let projection = self.camera.project(position);
        if !projection.in_front {
            return None;
        }
        let screen = self.viewport.to_screen(projection.ndc);
        self.viewport.contains(screen).then_some(screen)
    }

    fn label(&self, index: usize) -> Option<&str> {
        self.dataset
            .as_ref()?
            .get(index)
            .map(|p| p.label.as_str())
    }

    // ------------------------------------------------------------------
    // Camera, viewport and overlay
    // ------------------------------------------------------------------

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.camera.aspect = viewport.aspect();
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Direct camera access for orbit controls.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    pub fn set_overlay(&mut self, overlay: Option<AnalogyOverlay>) {
        self.overlay = overlay;
    }

    pub fn overlay(&self) -> Option<&AnalogyOverlay> {
        self.overlay.as_ref()
    }

    // ------------------------------------------------------------------
    // Outputs
    // ------------------------------------------------------------------

    pub fn highlight(&self) -> HighlightState {
        self.highlight
    }

    pub fn phase(&self) -> HighlightPhase {
        self.highlight.phase()
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.search_marker.iter().chain(self.hover_marker.iter())
    }

    pub fn cloud(&self) -> &PointCloud {
        &self.cloud
    }

    /// Whether the color buffer needs re-uploading.
    pub fn take_colors_dirty(&mut self) -> bool {
        self.cloud.take_dirty()
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }
}

impl std::fmt::Debug for SceneState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneState")
            .field("points", &self.cloud.len())
            .field("color_mode", &self.color_mode)
            .field("highlight", &self.highlight)
            .field("edges_visible", &self.edges.is_some())
            .finish_non_exhaustive()
    }
}
