//! Tap versus orbit-drag discrimination for touch input.

use glam::Vec2;

/// Accumulates the travel of one touch gesture.
#[derive(Debug, Clone, Default)]
pub struct TouchTracker {
    last: Option<Vec2>,
    travel: f32,
    slop_px: f32,
}

impl TouchTracker {
    pub fn new(slop_px: f32) -> Self {
        Self {
            last: None,
            travel: 0.0,
            slop_px,
        }
    }

    pub fn start(&mut self, screen: Vec2) {
        self.last = Some(screen);
        self.travel = 0.0;
    }

    /// Record movement; returns true once the gesture has become a drag.
    pub fn moved(&mut self, screen: Vec2) -> bool {
        if let Some(last) = self.last.replace(screen) {
            self.travel += last.distance(screen);
        }
        self.is_drag()
    }

    /// Finish the gesture. Returns the tap position if it never became a
    /// drag.
    pub fn end(&mut self, screen: Vec2) -> Option<Vec2> {
        let started = self.last.is_some();
        self.moved(screen);
        self.last = None;
        (started && !self.is_drag()).then_some(screen)
    }

    pub fn is_active(&self) -> bool {
        self.last.is_some()
    }

    pub fn is_drag(&self) -> bool {
        self.travel >= self.slop_px
    }

    pub fn travel(&self) -> f32 {
        self.travel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_short_touch_is_tap() {
        let mut touch = TouchTracker::new(8.0);
        touch.start(Vec2::new(10.0, 10.0));
        assert!(!touch.moved(Vec2::new(13.0, 10.0)));
        assert_eq!(touch.end(Vec2::new(14.0, 10.0)), Some(Vec2::new(14.0, 10.0)));
        assert!(!touch.is_active());
    }

    #[test]
    fn test_travel_accumulates_along_path() {
        let mut touch = TouchTracker::new(8.0);
        touch.start(Vec2::ZERO);
        touch.moved(Vec2::new(5.0, 0.0));
        // Back near the start, but 10 px of travel in total.
        assert!(touch.moved(Vec2::new(0.0, 0.0)));
        assert_eq!(touch.end(Vec2::ZERO), None);
    }

    #[test]
    fn test_end_without_start() {
        let mut touch = TouchTracker::new(8.0);
        assert_eq!(touch.end(Vec2::ZERO), None);
    }
}
