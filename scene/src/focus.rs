//! Narrow interface for search boxes and other callers outside the scene.

use crate::state::{SceneState, SearchOutcome};

/// What an outside caller may do with a visualization: read its
/// vocabulary and focus one of its words.
pub trait WordFocus {
    /// Labels in point order.
    fn vocabulary(&self) -> Vec<String>;

    /// Highlight `label` and move the camera to it. An empty label clears
    /// the current search.
    fn focus_word(&mut self, label: &str) -> SearchOutcome;
}

impl WordFocus for SceneState {
    fn vocabulary(&self) -> Vec<String> {
        SceneState::vocabulary(self)
    }

    fn focus_word(&mut self, label: &str) -> SearchOutcome {
        SceneState::focus_word(self, label)
    }
}
