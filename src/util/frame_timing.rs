use web_time::{Duration, Instant};

/// Frame pacing with a smoothed FPS readout.
#[derive(Debug, Clone)]
pub struct FrameTiming {
    /// Minimum time between frames; `None` means unlimited.
    interval: Option<Duration>,
    last_frame: Instant,
    /// Exponential moving average of instantaneous FPS.
    smoothed_fps: f32,
    /// Weight of each new sample (0.0-1.0).
    smoothing: f32,
}

impl FrameTiming {
    /// Create a new frame timer with the given FPS target (0 = unlimited).
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        Self {
            interval: interval_for(target_fps),
            last_frame: Instant::now(),
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Change the FPS target (0 = unlimited).
    pub fn set_target_fps(&mut self, target_fps: u32) {
        self.interval = interval_for(target_fps);
    }

    /// Whether enough time has passed since the last frame.
    #[must_use]
    pub fn should_render(&self) -> bool {
        self.time_until_next() == Duration::ZERO
    }

    /// How long until the next frame is due.
    #[must_use]
    pub fn time_until_next(&self) -> Duration {
        self.interval
            .map_or(Duration::ZERO, |i| i.saturating_sub(self.last_frame.elapsed()))
    }

    /// Call after rendering to update timing.
    pub fn end_frame(&mut self) {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        if frame_time > 0.0 {
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + self.smoothing / frame_time;
        }
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

fn interval_for(target_fps: u32) -> Option<Duration> {
    (target_fps > 0).then(|| Duration::from_secs_f64(1.0 / f64::from(target_fps)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_always_renders() {
        let timing = FrameTiming::new(0);
        assert!(timing.should_render());
        assert_eq!(timing.time_until_next(), Duration::ZERO);
    }

    #[test]
    fn capped_waits_for_interval() {
        let mut timing = FrameTiming::new(1);
        timing.end_frame();
        assert!(!timing.should_render());
        assert!(timing.time_until_next() > Duration::from_millis(500));
        timing.set_target_fps(0);
        assert!(timing.should_render());
    }
}
