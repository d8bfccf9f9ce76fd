//! Hover and search highlight state.

/// Which points are highlighted and whether a drag is in progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighlightState {
    pub hovered_index: Option<usize>,
    pub searched_index: Option<usize>,
    pub is_dragging: bool,
}

/// The controller's state, derived from [`HighlightState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightPhase {
    Idle,
    Hovered(usize),
    Searched(usize),
    HoveredWhileSearched { searched: usize, hovered: usize },
}

impl HighlightState {
    pub fn phase(&self) -> HighlightPhase {
        match (self.searched_index, self.hovered_index) {
            (None, None) => HighlightPhase::Idle,
            (None, Some(hovered)) => HighlightPhase::Hovered(hovered),
            (Some(searched), None) => HighlightPhase::Searched(searched),
            (Some(searched), Some(hovered)) => {
                HighlightPhase::HoveredWhileSearched { searched, hovered }
            }
        }
    }

    pub fn is_highlighted(&self, index: usize) -> bool {
        self.hovered_index == Some(index) || self.searched_index == Some(index)
    }
}
