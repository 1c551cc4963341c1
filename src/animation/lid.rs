use glam::Quat;

use crate::scene::NodeHandle;
use crate::scene::graph::SceneGraph;

/// Closed and open orientations of the lid, captured once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LidOrientationPair {
    pub closed: Quat,
    pub open: Quat,
}

impl LidOrientationPair {
    /// `closed` is the lid's orientation as authored; `open` composes it with
    /// the local `open_offset` rotation.
    #[must_use]
    pub fn capture(closed: Quat, open_offset: Quat) -> Self {
        Self {
            closed,
            open: (closed * open_offset).normalize(),
        }
    }

    /// Slerp from `closed` (0) to `open` (1). The endpoints are returned
    /// verbatim so repeated application never drifts.
    #[must_use]
    pub fn orientation_at(&self, progress: f32) -> Quat {
        if progress <= 0.0 || progress.is_nan() {
            self.closed
        } else if progress >= 1.0 {
            self.open
        } else {
            self.closed.slerp(self.open, progress)
        }
    }
}

/// Drives the bound lid node from a scalar progress value.
#[derive(Debug, Clone, Copy, Default)]
pub struct LidArticulation {
    node: Option<NodeHandle>,
    pair: Option<LidOrientationPair>,
}

impl LidArticulation {
    /// Reads the lid's current orientation as the closed pose. An absent lid
    /// (or one the graph can't read) yields an inert articulation.
    pub fn capture(graph: &impl SceneGraph, lid: Option<NodeHandle>, open_offset: Quat) -> Self {
        let pair = lid
            .and_then(|node| graph.transform(node))
            .map(|t| LidOrientationPair::capture(t.rotation, open_offset));
        Self {
            node: lid.filter(|_| pair.is_some()),
            pair,
        }
    }

    #[must_use]
    pub fn pair(&self) -> Option<&LidOrientationPair> {
        self.pair.as_ref()
    }

    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.node.is_some()
    }

    /// Assigns the interpolated orientation to the lid node.
    pub fn apply(&self, graph: &mut impl SceneGraph, progress: f32) {
        if let (Some(node), Some(pair)) = (self.node, self.pair) {
            graph.set_rotation(node, pair.orientation_at(progress));
        }
    }
}
