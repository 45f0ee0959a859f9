//! Frame clock for damping and fly steps.

use web_time::{Duration, Instant};

/// Upper bound on a single camera step. A stalled frame (breakpoint, tab
/// in background, blocking pick readback) must not teleport the camera.
const MAX_FRAME_DT: Duration = Duration::from_millis(100);

/// Per-frame clock feeding elapsed time into camera damping and fly motion.
pub struct FrameClock {
    /// Last tick timestamp
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameClock {
    /// Create a clock whose first tick measures from now.
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Seconds since the previous tick, clamped to [`MAX_FRAME_DT`].
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;

        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
        elapsed.min(MAX_FRAME_DT).as_secs_f32()
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_is_bounded() {
        let mut clock = FrameClock::new();
        let dt = clock.tick();
        assert!(dt >= 0.0);
        assert!(dt <= MAX_FRAME_DT.as_secs_f32());
    }
}
