//! Camera refocus animation driven by a frame clock.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use glam::Vec3;

use crate::camera::Camera;

/// Source of frame time in milliseconds.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> u64;
}

/// Monotonic wall clock, measured from construction.
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: AtomicU64::new(start_ms),
        }
    }

    pub fn set(&self, ms: u64) {
        self.now.store(ms, Ordering::SeqCst);
    }

    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Cubic ease-out over `0..=1`.
pub fn ease_out_cubic(t: f32) -> f32 {
    let x = t.clamp(0.0, 1.0);
    1.0 - (1.0 - x).powi(3)
}

/// Interpolation of camera position and orbit target.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraAnimation {
    pub start_position: Vec3,
    pub target_position: Vec3,
    pub start_target: Vec3,
    pub target_target: Vec3,
    pub start_ms: u64,
    pub duration_ms: u64,
}

impl CameraAnimation {
    /// Animate `camera` from its current pose to `(position, target)`.
    pub fn towards(
        camera: &Camera,
        position: Vec3,
        target: Vec3,
        start_ms: u64,
        duration_ms: u64,
    ) -> Self {
        Self {
            start_position: camera.position,
            target_position: position,
            start_target: camera.target,
            target_target: target,
            start_ms,
            duration_ms,
        }
    }

    /// Linear progress in `0..=1` at `now_ms`.
    pub fn progress(&self, now_ms: u64) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        let elapsed = now_ms.saturating_sub(self.start_ms) as f32;
        (elapsed / self.duration_ms as f32).min(1.0)
    }

    /// Eased `(position, target)` at `now_ms`.
    pub fn sample(&self, now_ms: u64) -> (Vec3, Vec3) {
        let progress = self.progress(now_ms);
        if progress >= 1.0 {
            return (self.target_position, self.target_target);
        }
        let t = ease_out_cubic(progress);
        (
            self.start_position.lerp(self.target_position, t),
            self.start_target.lerp(self.target_target, t),
        )
    }
}

/// Identifies one started animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationToken(u64);

/// Result of advancing an animation by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStep {
    /// The camera moved; `finished` once progress reached 1.
    Applied { finished: bool },
    /// The token was superseded or the animation already ended.
    Stale,
}

/// Owns the single live camera animation. Starting a new one invalidates
/// the previous token, so a loop still holding it stops on its next tick.
#[derive(Debug, Default)]
pub struct CameraAnimator {
    active: Option<(AnimationToken, CameraAnimation)>,
    issued: u64,
}

impl CameraAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, animation: CameraAnimation) -> AnimationToken {
        self.issued += 1;
        let token = AnimationToken(self.issued);
        self.active = Some((token, animation));
        token
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    pub fn is_live(&self, token: AnimationToken) -> bool {
        self.active.as_ref().is_some_and(|(live, _)| *live == token)
    }

    pub fn current(&self) -> Option<&CameraAnimation> {
        self.active.as_ref().map(|(_, animation)| animation)
    }

    /// Advance the animation identified by `token`.
    pub fn step(
        &mut self,
        token: AnimationToken,
        now_ms: u64,
        camera: &mut Camera,
    ) -> AnimationStep {
        let Some((live, animation)) = self.active.as_ref() else {
            return AnimationStep::Stale;
        };
        if *live != token {
            return AnimationStep::Stale;
        }

        let (position, target) = animation.sample(now_ms);
        camera.position = position;
        camera.target = target;

        let finished = animation.progress(now_ms) >= 1.0;
        if finished {
            self.active = None;
        }
        AnimationStep::Applied { finished }
    }

    /// Advance whichever animation is live, if any.
    pub fn tick(&mut self, now_ms: u64, camera: &mut Camera) -> AnimationStep {
        match self.active.as_ref() {
            Some((token, _)) => {
                let token = *token;
                self.step(token, now_ms, camera)
            }
            None => AnimationStep::Stale,
        }
    }
}
