use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time since the previous tick, in seconds, clamped.
    pub dt: f32,

    /// Index of this frame, starting at 0.
    pub frame_index: u64,
}

/// Counts presented frames and measures the time between them.
///
/// Delta time is clamped: the loop blocks on event waits, and a window left
/// idle behind a debugger would otherwise report huge deltas.
#[derive(Debug, Clone)]
pub struct FrameClock {
    started: Instant,
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        let now = Instant::now();
        Self {
            started: now,
            last: now,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Advances the clock and returns the new frame's timing.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);
        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }

    /// Number of ticks so far.
    pub fn frames(&self) -> u64 {
        self.frame_index
    }

    /// Average frames per second since construction; 0 before the first tick.
    pub fn average_fps(&self) -> f64 {
        let elapsed = self.last.saturating_duration_since(self.started).as_secs_f64();
        if self.frame_index == 0 || elapsed <= 0.0 {
            0.0
        } else {
            self.frame_index as f64 / elapsed
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
