use glam::{Quat, Vec3};
use slotmap::SlotMap;

use crate::scene::NodeHandle;
use crate::scene::graph::SceneGraph;
use crate::scene::node::Node;
use crate::scene::transform::Transform;

/// Minimal scene graph: an arena of named nodes with TRS transforms.
///
/// Hosts that already own a scene graph (a glTF importer, a full renderer)
/// implement [`SceneGraph`] on their own type instead. This arena is what
/// headless hosts and tests hand to the capsule.
#[derive(Debug, Default)]
pub struct Scene {
    pub nodes: SlotMap<NodeHandle, Node>,
    pub root_nodes: Vec<NodeHandle>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root_nodes: Vec::new(),
        }
    }

    /// Starts building a node.
    pub fn build_node(&'_ mut self, name: &str) -> NodeBuilder<'_> {
        NodeBuilder::new(self, name)
    }

    /// Adds a node at the root level.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    pub fn create_node(&mut self) -> NodeHandle {
        self.add_node(Node::default())
    }

    pub fn create_node_with_name(&mut self, name: &str) -> NodeHandle {
        self.add_node(Node::with_name(name))
    }

    /// Re-parents `child` under `parent`, detaching it from its old parent or
    /// from the root list.
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) {
        if child == parent {
            log::warn!("Cannot attach node to itself!");
            return;
        }
        if !self.nodes.contains_key(parent) {
            log::error!("Parent node not found during attach!");
            return;
        }
        if self.is_ancestor(child, parent) {
            log::warn!("Cannot attach node under its own descendant!");
            return;
        }

        let old_parent = self.nodes.get(child).and_then(|n| n.parent);
        if let Some(p) = old_parent {
            if let Some(n) = self.nodes.get_mut(p)
                && let Some(i) = n.children.iter().position(|&x| x == child)
            {
                n.children.remove(i);
            }
        } else if let Some(i) = self.root_nodes.iter().position(|&x| x == child) {
            self.root_nodes.remove(i);
        }

        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
        }
    }

    /// Whether `ancestor` lies on the parent chain above `node`.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: NodeHandle, node: NodeHandle) -> bool {
        let mut current = self.nodes.get(node).and_then(|n| n.parent);
        while let Some(handle) = current {
            if handle == ancestor {
                return true;
            }
            current = self.nodes.get(handle).and_then(|n| n.parent);
        }
        false
    }

    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    #[must_use]
    pub fn get_name(&self, handle: NodeHandle) -> Option<&str> {
        self.nodes.get(handle).map(|n| n.name.as_str())
    }

    pub fn set_name(&mut self, handle: NodeHandle, name: &str) {
        if let Some(node) = self.nodes.get_mut(handle) {
            name.clone_into(&mut node.name);
        }
    }

    /// Depth-first search for the first node named `name` under `root`
    /// (inclusive).
    #[must_use]
    pub fn find_node_by_name(&self, root: NodeHandle, name: &str) -> Option<NodeHandle> {
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(current) else {
                continue;
            };
            if node.name == name {
                return Some(current);
            }
            // Reverse so the first child is visited first.
            stack.extend(node.children.iter().rev().copied());
        }
        None
    }
}

impl SceneGraph for Scene {
    fn find_by_name(&self, root: NodeHandle, name: &str) -> Option<NodeHandle> {
        self.find_node_by_name(root, name)
    }

    fn transform(&self, node: NodeHandle) -> Option<Transform> {
        self.nodes.get(node).map(|n| n.transform)
    }

    fn set_transform(&mut self, node: NodeHandle, transform: Transform) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.transform = transform;
        }
    }
}

pub struct NodeBuilder<'a> {
    scene: &'a mut Scene,
    node: Node,
    parent: Option<NodeHandle>,
}

impl<'a> NodeBuilder<'a> {
    pub fn new(scene: &'a mut Scene, name: &str) -> Self {
        Self {
            scene,
            node: Node::with_name(name),
            parent: None,
        }
    }

    #[must_use]
    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.node.transform.position = Vec3::new(x, y, z);
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.node.transform.rotation = rotation;
        self
    }

    #[must_use]
    pub fn with_scale(mut self, s: f32) -> Self {
        self.node.transform.scale = Vec3::splat(s);
        self
    }

    #[must_use]
    pub fn with_parent(mut self, parent: NodeHandle) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Inserts the node and returns its handle. Without a parent the node
    /// becomes a root.
    pub fn build(self) -> NodeHandle {
        let handle = self.scene.nodes.insert(self.node);
        match self.parent {
            Some(parent) if self.scene.nodes.contains_key(parent) => {
                self.scene.attach(handle, parent);
            }
            _ => self.scene.root_nodes.push(handle),
        }
        handle
    }
}
