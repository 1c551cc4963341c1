//! Scene graph module
//!
//! The capsule only needs a thin view of the loaded asset:
//! - [`SceneGraph`]: the host capability (find by name, read/write transforms)
//! - [`Scene`]: a minimal named-node arena implementing it
//! - [`SceneBinding`]: the resolved lid, base and display-surface nodes

pub mod binding;
pub mod graph;
pub mod node;
pub mod scene;
pub mod transform;

pub use binding::SceneBinding;
pub use graph::SceneGraph;
pub use node::Node;
pub use scene::{NodeBuilder, Scene};
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
}
