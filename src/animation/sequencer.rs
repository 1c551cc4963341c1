use std::f32::consts::PI;
use std::time::Duration;

use crate::animation::easing::Easing;
use crate::settings::SealSettings;

/// Which animation logic is active. `Sealed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationPhase {
    #[default]
    Idle,
    Sealing,
    Sealed,
}

impl AnimationPhase {
    /// Short status text for a host UI.
    #[must_use]
    pub fn status_label(self) -> &'static str {
        match self {
            AnimationPhase::Idle => "Ready",
            AnimationPhase::Sealing => "Sealing…",
            AnimationPhase::Sealed => "Sealed",
        }
    }

    #[must_use]
    pub fn is_sealed(self) -> bool {
        self == AnimationPhase::Sealed
    }
}

/// Output of one sequencer step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SealProgress {
    /// 1 = lid fully open, 0 = fully closed.
    pub lid_progress: f32,
    /// Rise-and-fall envelope added to the yaw rate while sealing.
    pub spin_intensity: f32,
}

impl SealProgress {
    pub const OPEN: Self = Self {
        lid_progress: 1.0,
        spin_intensity: 0.0,
    };
    pub const CLOSED: Self = Self {
        lid_progress: 0.0,
        spin_intensity: 0.0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SealEvent {
    Started,
    Completed,
}

/// One-shot, time-driven seal animation.
///
/// Progress is recomputed from accumulated wall-clock time on every tick,
/// never integrated, so a late or skipped frame can't shift the curve.
#[derive(Debug, Clone)]
pub struct SealSequencer {
    settings: SealSettings,
    easing: Easing,
    phase: AnimationPhase,
    elapsed: Duration,
    progress: SealProgress,
}

impl SealSequencer {
    #[must_use]
    pub fn new(settings: SealSettings) -> Self {
        Self {
            settings,
            easing: Easing::CubicInOut,
            phase: AnimationPhase::Idle,
            elapsed: Duration::ZERO,
            progress: SealProgress::OPEN,
        }
    }

    #[must_use]
    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    #[must_use]
    pub fn progress(&self) -> SealProgress {
        self.progress
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Elapsed time normalized to the sequence duration, clamped to `[0, 1]`.
    #[must_use]
    pub fn normalized_time(&self) -> f32 {
        let duration = self.settings.duration();
        if duration.is_zero() {
            return 1.0;
        }
        self.elapsed.div_duration_f32(duration).clamp(0.0, 1.0)
    }

    /// `Idle -> Sealing`. Ignored unless the profile is complete and no
    /// sequence has started yet.
    pub fn request(&mut self, profile_complete: bool) -> Option<SealEvent> {
        if !profile_complete {
            log::debug!("Seal request ignored: profile incomplete");
            return None;
        }
        if self.phase != AnimationPhase::Idle {
            log::debug!("Seal request ignored: phase is {:?}", self.phase);
            return None;
        }

        self.phase = AnimationPhase::Sealing;
        self.elapsed = Duration::ZERO;
        self.progress = self.sample(0.0);
        log::info!("Seal sequence started ({:.2}s)", self.settings.duration_secs);
        Some(SealEvent::Started)
    }

    /// Advances the sequence by a wall-clock delta. Outside `Sealing` this is
    /// a no-op. Returns `Completed` exactly once, on the tick that reaches the
    /// end.
    pub fn tick(&mut self, dt: Duration) -> Option<SealEvent> {
        if self.phase != AnimationPhase::Sealing {
            return None;
        }

        self.elapsed = self.elapsed.saturating_add(dt);
        let t = self.normalized_time();

        if t >= 1.0 {
            self.progress = SealProgress::CLOSED;
            self.phase = AnimationPhase::Sealed;
            log::info!("Seal sequence completed after {:?}", self.elapsed);
            return Some(SealEvent::Completed);
        }

        self.progress = self.sample(t);
        None
    }

    /// Pure mapping from normalized time to progress. `t >= 1` is exactly
    /// [`SealProgress::CLOSED`].
    #[must_use]
    pub fn sample(&self, t: f32) -> SealProgress {
        let t = t.clamp(0.0, 1.0);
        if t >= 1.0 {
            return SealProgress::CLOSED;
        }

        let eased = self.easing.evaluate(t);
        let close_fraction = self.settings.lid_close_fraction;
        let lid_phase = if close_fraction > 0.0 {
            (eased / close_fraction).min(1.0)
        } else {
            1.0
        };

        SealProgress {
            lid_progress: 1.0 - lid_phase,
            spin_intensity: (t * PI).sin() * self.settings.spin_peak,
        }
    }
}
