use std::sync::atomic::{AtomicU64, Ordering};

use image::RgbaImage;
use rustc_hash::FxHashMap;

use crate::scene::NodeHandle;

// Global texture ID generator
static NEXT_TEXTURE_ID: AtomicU64 = AtomicU64::new(1);

/// The three procedurally drawn display surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    LidLabel,
    Name,
    Avatar,
}

impl SurfaceKind {
    pub const ALL: [SurfaceKind; 3] = [SurfaceKind::LidLabel, SurfaceKind::Name, SurfaceKind::Avatar];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SurfaceKind::LidLabel => "LidLabel",
            SurfaceKind::Name => "Name",
            SurfaceKind::Avatar => "Avatar",
        }
    }
}

/// A raster image bound to one screen node.
///
/// Textures are never patched: each regeneration produces a new texture with
/// a fresh `id`. `version` counts regenerations of the same slot so a
/// renderer can tell when to re-upload.
#[derive(Debug, Clone)]
pub struct SurfaceTexture {
    id: u64,
    kind: SurfaceKind,
    node: Option<NodeHandle>,
    version: u64,
    image: RgbaImage,
}

impl SurfaceTexture {
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }
    #[must_use]
    pub fn kind(&self) -> SurfaceKind {
        self.kind
    }
    #[must_use]
    pub fn node(&self) -> Option<NodeHandle> {
        self.node
    }
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }
    #[must_use]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }
    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Current texture per surface. Replacing a slot drops the previous texture.
#[derive(Debug, Default)]
pub struct TextureSlots {
    slots: FxHashMap<SurfaceKind, SurfaceTexture>,
}

impl TextureSlots {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a freshly rendered image for `kind`, discarding the old one.
    pub fn replace(
        &mut self,
        kind: SurfaceKind,
        node: Option<NodeHandle>,
        image: RgbaImage,
    ) -> &SurfaceTexture {
        let version = self.slots.get(&kind).map_or(1, |old| old.version + 1);
        let texture = SurfaceTexture {
            id: NEXT_TEXTURE_ID.fetch_add(1, Ordering::Relaxed),
            kind,
            node,
            version,
            image,
        };
        log::debug!(
            "Surface {} regenerated (v{version}, {}x{})",
            kind.label(),
            texture.width(),
            texture.height()
        );

        self.slots.insert(kind, texture);
        &self.slots[&kind]
    }

    #[must_use]
    pub fn get(&self, kind: SurfaceKind) -> Option<&SurfaceTexture> {
        self.slots.get(&kind)
    }

    #[must_use]
    pub fn version(&self, kind: SurfaceKind) -> u64 {
        self.slots.get(&kind).map_or(0, SurfaceTexture::version)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SurfaceTexture> {
        self.slots.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
