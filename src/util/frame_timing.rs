use std::time::{Duration, Instant};

/// Smoothed FPS measurement for the debug panel.
#[derive(Debug, Clone)]
pub struct FrameTiming {
    /// Last frame timestamp
    last_frame: Instant,
    /// Duration of the most recent frame
    last_frame_time: Duration,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTiming {
    /// Start timing from now.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Start timing from `start`.
    #[must_use]
    pub fn starting_at(start: Instant) -> Self {
        Self {
            last_frame: start,
            last_frame_time: Duration::ZERO,
            smoothed_fps: 60.0,
            smoothing: 0.05, // 5% new value, 95% old value
        }
    }

    /// Call once per presented frame.
    pub fn end_frame(&mut self) {
        self.end_frame_at(Instant::now());
    }

    /// Record a frame that finished at `now`.
    pub fn end_frame_at(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        self.last_frame_time = elapsed;

        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps =
                self.smoothed_fps * (1.0 - self.smoothing) + instant_fps * self.smoothing;
        }
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }

    /// Duration of the most recent frame.
    #[must_use]
    pub fn last_frame_time(&self) -> Duration {
        self.last_frame_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converges_towards_steady_rate() {
        let start = Instant::now();
        let mut timing = FrameTiming::starting_at(start);
        let frame = Duration::from_millis(10);
        for i in 1..=400 {
            timing.end_frame_at(start + frame * i);
        }
        assert!((timing.fps() - 100.0).abs() < 1.0, "fps {}", timing.fps());
        assert_eq!(timing.last_frame_time(), frame);
    }

    #[test]
    fn zero_length_frame_keeps_fps() {
        let start = Instant::now();
        let mut timing = FrameTiming::starting_at(start);
        timing.end_frame_at(start);
        assert_eq!(timing.fps(), 60.0);
    }
}
