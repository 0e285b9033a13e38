//! Frame clock

/// Longest frame delta the clock will report
const MAX_DELTA: f64 = 0.25;

/// Tracks game time and the delta of the current frame
pub struct GameClock {
    /// Total elapsed game time in seconds
    pub total_time: f64,
    /// Time since last frame in seconds
    pub delta_time: f64,
    /// Number of frames advanced so far
    pub frame: u64,
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl GameClock {
    pub fn new() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            frame: 0,
        }
    }

    /// Advance by a fixed delta
    pub fn advance(&mut self, dt: f64) {
        self.delta_time = dt.clamp(0.0, MAX_DELTA);
        self.total_time += self.delta_time;
        self.frame += 1;
    }
}
