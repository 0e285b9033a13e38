//! Field-of-view transition
//!
//! A zoom is a small state machine stepped once per frame. Starting a new
//! transition replaces the current one outright; there is no queue.

use vantage_core::math;

/// Interpolates a field of view from `start` to `target` over `duration` seconds
#[derive(Debug, Clone, PartialEq)]
pub struct FovTransition {
    start: f32,
    target: f32,
    duration: f32,
    elapsed: f32,
    finished: bool,
}

impl FovTransition {
    pub fn new(start: f32, target: f32, duration: f32) -> Self {
        Self {
            start,
            target,
            duration: duration.max(0.0),
            elapsed: 0.0,
            finished: false,
        }
    }

    /// Value for this frame, then advance by `dt`.
    ///
    /// The first step yields `start`. Once `elapsed` reaches `duration` the
    /// step yields exactly `target` and the transition is finished.
    pub fn step(&mut self, dt: f32) -> f32 {
        if self.finished {
            return self.target;
        }

        if self.elapsed < self.duration {
            let value = math::lerp(self.start, self.target, self.elapsed / self.duration);
            self.elapsed += dt;
            value
        } else {
            self.finished = true;
            self.target
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
