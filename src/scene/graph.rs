use glam::{Quat, Vec3};

use crate::scene::NodeHandle;
use crate::scene::transform::Transform;

/// The scene-graph capability the capsule controller needs from its host.
///
/// A loaded asset only has to offer a by-name lookup and read/write access to
/// node transforms. Absent nodes read as `None` and writes to them are
/// ignored.
pub trait SceneGraph {
    /// First node named `name` in the subtree rooted at `root`.
    fn find_by_name(&self, root: NodeHandle, name: &str) -> Option<NodeHandle>;

    fn transform(&self, node: NodeHandle) -> Option<Transform>;

    fn set_transform(&mut self, node: NodeHandle, transform: Transform);

    fn set_rotation(&mut self, node: NodeHandle, rotation: Quat) {
        if let Some(mut t) = self.transform(node) {
            t.rotation = rotation;
            self.set_transform(node, t);
        }
    }

    fn set_position(&mut self, node: NodeHandle, position: Vec3) {
        if let Some(mut t) = self.transform(node) {
            t.position = position;
            self.set_transform(node, t);
        }
    }
}
