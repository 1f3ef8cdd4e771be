//! Frame timing and delta time.
//!
//! [`Time`] is advanced by the window loop at the start of each frame. The
//! scene only ever sees [`Time::delta_secs`], which may be zero (first frame)
//! or irregular; nothing assumes a fixed timestep.

use std::time::{Duration, Instant};

/// Longest delta handed to the simulation, so a stall (window drag, debugger
/// pause) does not launch everything through the floor in one step.
pub const MAX_DELTA: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy)]
pub struct Time {
    /// When the app started.
    startup: Instant,
    /// When the current frame started.
    frame_start: Instant,
    /// Duration of the previous frame, clamped to [`MAX_DELTA`].
    delta: Duration,
    /// Total time since app startup.
    elapsed: Duration,
    frame_count: u64,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(now: Instant) -> Self {
        Self {
            startup: now,
            frame_start: now,
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Call at the start of each frame.
    pub fn update(&mut self) {
        self.tick(Instant::now());
    }

    /// Advance to `now`. A `now` earlier than the last frame counts as a zero
    /// delta.
    pub fn tick(&mut self, now: Instant) {
        self.delta = now.saturating_duration_since(self.frame_start).min(MAX_DELTA);
        self.frame_start = now.max(self.frame_start);
        self.elapsed = self.frame_start - self.startup;
        self.frame_count += 1;
    }

    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Delta time in seconds (f32), the most common way to use it.
    pub fn delta_secs(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Number of frames ticked so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Estimated FPS based on the last frame's delta.
    pub fn fps(&self) -> f32 {
        if self.delta.as_secs_f32() > 0.0 {
            1.0 / self.delta.as_secs_f32()
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_measures_the_gap_between_frames() {
        let start = Instant::now();
        let mut time = Time::starting_at(start);
        time.tick(start + Duration::from_millis(16));
        assert_eq!(time.delta(), Duration::from_millis(16));
        time.tick(start + Duration::from_millis(50));
        assert_eq!(time.delta(), Duration::from_millis(34));
        assert_eq!(time.elapsed(), Duration::from_millis(50));
        assert_eq!(time.frame_count(), 2);
    }

    #[test]
    fn same_instant_is_a_zero_delta() {
        let start = Instant::now();
        let mut time = Time::starting_at(start);
        time.tick(start);
        assert_eq!(time.delta_secs(), 0.0);
        assert_eq!(time.fps(), 0.0);
    }

    #[test]
    fn long_stall_is_clamped() {
        let start = Instant::now();
        let mut time = Time::starting_at(start);
        time.tick(start + Duration::from_secs(3));
        assert_eq!(time.delta(), MAX_DELTA);
        assert_eq!(time.elapsed(), Duration::from_secs(3));
    }
}
