//! Easing curves for time-driven animation.

/// Easing function variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// No easing.
    Linear,
    /// Cubic ease-in-out: `4t³` on the first half, `1 - (-2t + 2)³ / 2` on the second.
    #[default]
    CubicInOut,
}

impl Easing {
    /// Evaluates the curve at `t`, clamped to `[0, 1]`.
    #[inline]
    #[must_use]
    pub fn evaluate(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}
