use crate::resources::texture::SurfaceKind;
use crate::scene::NodeHandle;
use crate::scene::graph::SceneGraph;
use crate::settings::NodeNames;

/// The named parts of a loaded capsule asset.
///
/// Resolved once at asset-load time and never mutated. Asset exports vary
/// their part naming across revisions, so every slot except the root may be
/// `None`; consumers skip their work for an absent slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneBinding {
    pub root: NodeHandle,
    pub lid: Option<NodeHandle>,
    pub base: Option<NodeHandle>,
    pub lid_screen: Option<NodeHandle>,
    pub name_screen: Option<NodeHandle>,
    pub avatar_screen: Option<NodeHandle>,
}

impl SceneBinding {
    /// Looks up every part under `root` by exact name. The lid falls back to
    /// its alternate name. Missing parts are logged and left empty.
    pub fn resolve(graph: &impl SceneGraph, root: NodeHandle, names: &NodeNames) -> Self {
        let lid = graph
            .find_by_name(root, &names.lid)
            .or_else(|| graph.find_by_name(root, &names.lid_alternate));
        if lid.is_none() {
            log::debug!(
                "Scene part '{}' (or '{}') not found, lid animation disabled",
                names.lid,
                names.lid_alternate
            );
        }

        let binding = Self {
            root,
            lid,
            base: lookup(graph, root, &names.base),
            lid_screen: lookup(graph, root, &names.lid_screen),
            name_screen: lookup(graph, root, &names.name_screen),
            avatar_screen: lookup(graph, root, &names.avatar_screen),
        };

        log::info!(
            "Resolved capsule binding: {}/6 parts present",
            1 + binding.present_count()
        );
        binding
    }

    /// The screen node a surface texture belongs to.
    #[must_use]
    pub fn surface_node(&self, kind: SurfaceKind) -> Option<NodeHandle> {
        match kind {
            SurfaceKind::LidLabel => self.lid_screen,
            SurfaceKind::Name => self.name_screen,
            SurfaceKind::Avatar => self.avatar_screen,
        }
    }

    fn present_count(&self) -> usize {
        [
            self.lid,
            self.base,
            self.lid_screen,
            self.name_screen,
            self.avatar_screen,
        ]
        .iter()
        .filter(|slot| slot.is_some())
        .count()
    }
}

fn lookup(graph: &impl SceneGraph, root: NodeHandle, name: &str) -> Option<NodeHandle> {
    let found = graph.find_by_name(root, name);
    if found.is_none() {
        log::debug!("Scene part '{name}' not found, skipping");
    }
    found
}
