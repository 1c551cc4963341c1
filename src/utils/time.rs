#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// Timing for one frame as seen by the capsule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Wall-clock delta since the previous frame.
    pub raw: Duration,
    /// `raw` capped to the maximum frame delta, in seconds. Feeds motion.
    pub delta: f32,
    /// Total wall-clock time since the clock started, in seconds.
    pub elapsed: f32,
}

/// Frame clock with a capped delta.
///
/// A paused render loop (backgrounded tab, debugger) resumes with one huge
/// delta. Motion only ever sees the capped value; elapsed time keeps the raw
/// sum so wall-clock driven animation stays on schedule.
#[derive(Debug, Clone)]
pub struct FrameClock {
    max_delta: Duration,
    last_update: Option<Instant>,
    elapsed: Duration,
    /// Total number of frames advanced
    pub frame_count: u64,
}

impl FrameClock {
    #[must_use]
    pub fn new(max_delta: Duration) -> Self {
        Self {
            max_delta,
            last_update: None,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Advances by an explicit delta (hosts with their own frame timing, tests).
    pub fn advance(&mut self, dt: Duration) -> FrameTime {
        self.elapsed = self.elapsed.saturating_add(dt);
        self.frame_count += 1;
        FrameTime {
            raw: dt,
            delta: dt.min(self.max_delta).as_secs_f32(),
            elapsed: self.elapsed.as_secs_f32(),
        }
    }

    /// Advances by the wall-clock time since the previous call. The first call
    /// yields a zero delta.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = self
            .last_update
            .map_or(Duration::ZERO, |last| now.duration_since(last));
        self.last_update = Some(now);
        self.advance(dt)
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    #[must_use]
    pub fn max_delta(&self) -> Duration {
        self.max_delta
    }
}
