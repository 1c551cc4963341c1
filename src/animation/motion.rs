use std::f32::consts::TAU;

use glam::{Quat, Vec3};

use crate::animation::sequencer::{AnimationPhase, SealProgress};
use crate::scene::NodeHandle;
use crate::scene::graph::SceneGraph;
use crate::settings::MotionSettings;

/// Per-frame yaw spin and vertical bob of the whole capsule.
///
/// A sampler, not a state machine: each frame it reads the current phase and
/// sequencer output. Its only memory is the yaw accumulator and the base pose
/// captured at bind time.
#[derive(Debug, Clone)]
pub struct MotionDriver {
    settings: MotionSettings,
    yaw: f32,
    base_rotation: Quat,
    base_position: Vec3,
}

impl MotionDriver {
    #[must_use]
    pub fn new(settings: MotionSettings) -> Self {
        Self {
            settings,
            yaw: 0.0,
            base_rotation: Quat::IDENTITY,
            base_position: Vec3::ZERO,
        }
    }

    /// Records the root's authored pose; all motion is expressed relative to it.
    pub fn capture(&mut self, graph: &impl SceneGraph, root: NodeHandle) {
        if let Some(t) = graph.transform(root) {
            self.base_rotation = t.rotation;
            self.base_position = t.position;
        }
    }

    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Yaw rate (radians per second) for the given phase and progress.
    #[must_use]
    pub fn yaw_rate(&self, phase: AnimationPhase, progress: SealProgress) -> f32 {
        match phase {
            AnimationPhase::Idle => self.settings.idle_yaw_rate,
            AnimationPhase::Sealing => {
                self.settings.idle_yaw_rate + progress.spin_intensity * self.settings.spin_multiplier
            }
            AnimationPhase::Sealed => 0.0,
        }
    }

    /// Vertical offset of the idle bob at wall-clock time `elapsed` (seconds).
    #[must_use]
    pub fn bob_offset(&self, elapsed: f32) -> f32 {
        let period = self.settings.bob_period_secs;
        if period <= 0.0 {
            return 0.0;
        }
        (elapsed * TAU / period).sin() * self.settings.bob_amplitude
    }

    /// Applies one frame of motion to `root`. `dt` must already be clamped.
    pub fn update(
        &mut self,
        graph: &mut impl SceneGraph,
        root: NodeHandle,
        phase: AnimationPhase,
        progress: SealProgress,
        dt: f32,
        elapsed: f32,
    ) {
        let y_offset = match phase {
            AnimationPhase::Idle => self.bob_offset(elapsed),
            AnimationPhase::Sealing => 0.0,
            AnimationPhase::Sealed => return,
        };

        self.yaw = (self.yaw + self.yaw_rate(phase, progress) * dt).rem_euclid(TAU);

        if let Some(mut t) = graph.transform(root) {
            t.rotation = Quat::from_rotation_y(self.yaw) * self.base_rotation;
            t.position = self.base_position + Vec3::Y * y_offset;
            graph.set_transform(root, t);
        }
    }
}
