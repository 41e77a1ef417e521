use std::time::Instant;

/// Smallest delta a tick reports; frame code requires strictly positive time steps
pub const MIN_DELTA: f32 = 1e-6;

/// Minimal frame clock - just tracks delta time
/// Systems manage their own internal state
#[derive(Debug)]
pub struct Clock {
    last_tick: Instant,
    frame_number: u64,
}

impl Clock {
    /// Create new clock starting now
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
            frame_number: 0,
        }
    }

    /// Get delta time since last tick and advance clock
    /// Returns delta in seconds, never below [`MIN_DELTA`]
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        self.frame_number += 1;
        delta.max(MIN_DELTA)
    }

    /// Number of ticks so far
    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    /// Reset clock to current time
    pub fn reset(&mut self) {
        self.last_tick = Instant::now();
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

/// Frames-per-second average over a fixed reporting interval
#[derive(Debug, Clone, Copy)]
pub struct FpsCounter {
    interval: f32,
    elapsed: f32,
    frames: u32,
    fps: f32,
}

impl FpsCounter {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
            frames: 0,
            fps: 0.0,
        }
    }

    /// Count one frame; returns the new average when an interval completes
    pub fn tick(&mut self, delta: f32) -> Option<f32> {
        self.frames += 1;
        self.elapsed += delta;

        if self.elapsed >= self.interval {
            self.fps = self.frames as f32 / self.elapsed;
            self.frames = 0;
            self.elapsed = 0.0;
            Some(self.fps)
        } else {
            None
        }
    }

    /// Last reported average
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Frame time in milliseconds for the last reported average
    pub fn frame_ms(&self) -> f32 {
        if self.fps > 0.0 {
            1000.0 / self.fps
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn clock_measures_delta() {
        let mut clock = Clock::new();

        thread::sleep(Duration::from_millis(10));
        let delta = clock.tick();

        assert!(delta >= 0.009 && delta <= 0.5);
        assert_eq!(clock.frame_number(), 1);
    }

    #[test]
    fn clock_delta_is_strictly_positive() {
        let mut clock = Clock::new();
        for _ in 0..100 {
            assert!(clock.tick() > 0.0);
        }
    }

    #[test]
    fn clock_resets() {
        let mut clock = Clock::new();

        thread::sleep(Duration::from_millis(10));
        clock.reset();

        let delta = clock.tick();
        assert!(delta < 0.009);
    }

    #[test]
    fn fps_reports_once_per_interval() {
        let mut fps = FpsCounter::new(1.0);

        for _ in 0..59 {
            assert_eq!(fps.tick(1.0 / 60.0), None);
        }
        let reported = fps.tick(1.0 / 60.0 + 1e-4).unwrap();
        assert!((reported - 60.0).abs() < 0.1, "fps {reported}");
        assert!((fps.frame_ms() - 16.67).abs() < 0.1);
    }

    #[test]
    fn fps_starts_at_zero() {
        let fps = FpsCounter::new(1.0);
        assert_eq!(fps.fps(), 0.0);
        assert_eq!(fps.frame_ms(), 0.0);
    }
}
