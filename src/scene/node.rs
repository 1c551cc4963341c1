use crate::scene::NodeHandle;
use crate::scene::transform::Transform;

/// One part of the loaded capsule asset.
///
/// `name` is what [`SceneBinding`](crate::scene::SceneBinding) matches
/// against. Hierarchy links are maintained by [`Scene`](crate::scene::Scene).
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,
}

impl Node {
    #[must_use]
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }
}
