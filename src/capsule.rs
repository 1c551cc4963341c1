//! Capsule Controller
//!
//! [`Capsule`] owns every piece of application state (profile, binding,
//! sequencer, motion, textures) and is driven by a single per-frame call:
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use capsule::{Capsule, CapsuleSettings, Scene};
//!
//! let mut scene = Scene::new();
//! let root = scene.create_node_with_name("Capsule");
//! // ... host attaches the loaded asset's nodes under `root` ...
//!
//! let mut capsule = Capsule::new(scene, root, CapsuleSettings::default());
//! capsule.set_nickname("Ada");
//! capsule.decode_avatar(std::fs::read("ada.png")?);
//!
//! // Once per display refresh:
//! capsule.on_tick(Duration::from_millis(16));
//! ```
//!
//! # Frame order
//!
//! Each [`Capsule::on_tick`] runs, in order: completed avatar decodes, the
//! seal sequencer, lid orientation, whole-object motion, then completion
//! handling. Everything is recomputed from current state, so the order is
//! the only coordination needed.

use std::time::Duration;

use flume::{Receiver, RecvTimeoutError, TryRecvError};
use image::RgbaImage;

use crate::animation::{
    AnimationPhase, LidArticulation, MotionDriver, SealEvent, SealProgress, SealSequencer,
};
use crate::errors::{CapsuleError, Result};
use crate::export::{ExportedFrame, export_frame};
use crate::profile::Profile;
use crate::resources::texture::{SurfaceKind, SurfaceTexture, TextureSlots};
use crate::resources::typeface::Typeface;
use crate::scene::{NodeHandle, Scene, SceneBinding, SceneGraph};
use crate::settings::CapsuleSettings;
use crate::surface::SurfaceCompositor;
use crate::utils::time::FrameClock;

type AvatarDecode = Result<RgbaImage>;

pub struct Capsule<G: SceneGraph = Scene> {
    settings: CapsuleSettings,
    graph: G,
    binding: SceneBinding,
    profile: Profile,

    sequencer: SealSequencer,
    lid: LidArticulation,
    motion: MotionDriver,
    clock: FrameClock,

    compositor: SurfaceCompositor,
    textures: TextureSlots,

    pending_avatar: Option<Receiver<AvatarDecode>>,
}

impl<G: SceneGraph> Capsule<G> {
    /// Binds the asset under `root`, opens the lid and draws the initial
    /// surfaces.
    pub fn new(graph: G, root: NodeHandle, settings: CapsuleSettings) -> Self {
        let binding = SceneBinding::resolve(&graph, root, &settings.nodes);
        let lid = LidArticulation::capture(&graph, binding.lid, settings.seal.lid_open_offset());
        let mut motion = MotionDriver::new(settings.motion.clone());
        motion.capture(&graph, root);

        let mut capsule = Self {
            sequencer: SealSequencer::new(settings.seal.clone()),
            clock: FrameClock::new(settings.motion.max_frame_delta()),
            compositor: SurfaceCompositor::new(settings.surface.clone()),
            textures: TextureSlots::new(),
            profile: Profile::new(),
            pending_avatar: None,
            settings,
            graph,
            binding,
            lid,
            motion,
        };

        capsule
            .lid
            .apply(&mut capsule.graph, capsule.sequencer.progress().lid_progress);
        capsule.regenerate(SurfaceKind::LidLabel);
        capsule.regenerate(SurfaceKind::Name);
        capsule
    }

    /// Runs the host's asset loader once and binds the result. A load failure
    /// is logged and returned as [`CapsuleError::AssetLoad`]; there is no retry.
    pub fn load<E: std::fmt::Display>(
        loader: impl FnOnce() -> std::result::Result<(G, NodeHandle), E>,
        settings: CapsuleSettings,
    ) -> Result<Self> {
        match loader() {
            Ok((graph, root)) => Ok(Self::new(graph, root, settings)),
            Err(err) => {
                log::error!("Capsule asset failed to load: {err}");
                Err(CapsuleError::AssetLoad(err.to_string()))
            }
        }
    }

    #[must_use]
    pub fn with_typeface(mut self, typeface: Typeface) -> Self {
        self.set_typeface(typeface);
        self
    }

    /// Installs the surface font and redraws the text surfaces.
    pub fn set_typeface(&mut self, typeface: Typeface) {
        self.compositor.set_typeface(typeface);
        self.regenerate(SurfaceKind::LidLabel);
        self.regenerate(SurfaceKind::Name);
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn phase(&self) -> AnimationPhase {
        self.sequencer.phase()
    }

    #[must_use]
    pub fn progress(&self) -> SealProgress {
        self.sequencer.progress()
    }

    #[must_use]
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    #[must_use]
    pub fn binding(&self) -> &SceneBinding {
        &self.binding
    }

    #[must_use]
    pub fn graph(&self) -> &G {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut G {
        &mut self.graph
    }

    #[must_use]
    pub fn settings(&self) -> &CapsuleSettings {
        &self.settings
    }

    #[must_use]
    pub fn textures(&self) -> &TextureSlots {
        &self.textures
    }

    #[must_use]
    pub fn texture(&self, kind: SurfaceKind) -> Option<&SurfaceTexture> {
        self.textures.get(kind)
    }

    #[must_use]
    pub fn motion(&self) -> &MotionDriver {
        &self.motion
    }

    #[must_use]
    pub fn lid(&self) -> &LidArticulation {
        &self.lid
    }

    /// Wall-clock time accumulated through [`on_tick`](Self::on_tick).
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    #[must_use]
    pub fn has_pending_avatar(&self) -> bool {
        self.pending_avatar.is_some()
    }

    #[must_use]
    pub fn is_message_editable(&self) -> bool {
        !self.phase().is_sealed()
    }

    #[must_use]
    pub fn can_export(&self) -> bool {
        self.phase().is_sealed()
    }

    // ========================================================================
    // Profile inbound
    // ========================================================================

    pub fn set_nickname(&mut self, nickname: &str) -> bool {
        if !self.profile.set_nickname(nickname) {
            return false;
        }
        self.regenerate(SurfaceKind::Name);
        true
    }

    pub fn set_avatar_image(&mut self, avatar: RgbaImage) -> bool {
        if !self.profile.set_avatar(avatar) {
            return false;
        }
        self.regenerate(SurfaceKind::Avatar);
        true
    }

    pub fn set_message(&mut self, message: &str) -> bool {
        self.profile.set_message(message)
    }

    /// Decodes an uploaded avatar off the frame loop. The result is applied
    /// by a later [`on_tick`](Self::on_tick); a newer request supersedes an
    /// older one still in flight.
    pub fn decode_avatar(&mut self, bytes: Vec<u8>) -> bool {
        if self.profile.is_locked() {
            return false;
        }

        let (tx, rx) = flume::bounded::<AvatarDecode>(1);

        #[cfg(not(target_arch = "wasm32"))]
        {
            let spawned = std::thread::Builder::new()
                .name("avatar-decode".to_string())
                .spawn(move || {
                    if tx.send(decode_avatar_bytes(&bytes)).is_err() {
                        log::debug!("Avatar decode finished after its request was superseded");
                    }
                });
            if let Err(err) = spawned {
                log::warn!("Failed to spawn avatar decode thread: {err}");
                return false;
            }
        }
        #[cfg(target_arch = "wasm32")]
        {
            // No worker threads: decode inline, deliver on the next tick.
            if tx.send(decode_avatar_bytes(&bytes)).is_err() {
                log::debug!("Avatar decode result dropped: receiver already gone");
            }
        }

        self.pending_avatar = Some(rx);
        true
    }

    /// Blocks until the in-flight avatar decode finishes or `timeout`
    /// elapses. Returns whether a decode result was consumed.
    pub fn wait_for_avatar(&mut self, timeout: Duration) -> bool {
        let Some(rx) = self.pending_avatar.take() else {
            return false;
        };
        match rx.recv_timeout(timeout) {
            Ok(result) => {
                self.apply_decoded_avatar(result);
                true
            }
            Err(RecvTimeoutError::Timeout) => {
                self.pending_avatar = Some(rx);
                false
            }
            Err(RecvTimeoutError::Disconnected) => {
                log::warn!("Avatar decode worker exited without a result");
                false
            }
        }
    }

    /// Starts the seal sequence if the profile is complete and no sequence
    /// has run yet. Otherwise a silent no-op.
    pub fn request_seal(&mut self) -> bool {
        self.sequencer.request(self.profile.is_complete()).is_some()
    }

    // ========================================================================
    // Frame loop
    // ========================================================================

    /// Runs one frame. `dt` is the raw wall-clock delta since the previous
    /// frame; motion sees it capped, the seal sequencer sees it as is.
    pub fn on_tick(&mut self, dt: Duration) -> Option<SealEvent> {
        self.poll_avatar();

        let frame = self.clock.advance(dt);
        let event = self.sequencer.tick(frame.raw);
        let phase = self.sequencer.phase();
        let progress = self.sequencer.progress();

        self.lid.apply(&mut self.graph, progress.lid_progress);
        self.motion.update(
            &mut self.graph,
            self.binding.root,
            phase,
            progress,
            frame.delta,
            frame.elapsed,
        );

        if event == Some(SealEvent::Completed) {
            self.finish_seal();
        }
        event
    }

    /// Hands the host's final frame to the export encoder. Only available
    /// once sealed.
    pub fn export(&self, frame: &RgbaImage) -> Result<ExportedFrame> {
        if !self.can_export() {
            return Err(CapsuleError::NotSealed);
        }
        export_frame(self.profile.nickname(), frame)
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    fn finish_seal(&mut self) {
        self.profile.lock();
        if self.pending_avatar.take().is_some() {
            log::debug!("Dropping in-flight avatar decode: capsule sealed");
        }
        self.regenerate(SurfaceKind::LidLabel);
        log::info!("Capsule sealed for '{}'", self.profile.nickname());
    }

    fn poll_avatar(&mut self) {
        let polled = match &self.pending_avatar {
            Some(rx) => rx.try_recv(),
            None => return,
        };
        match polled {
            Ok(result) => {
                self.pending_avatar = None;
                self.apply_decoded_avatar(result);
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                log::warn!("Avatar decode worker exited without a result");
                self.pending_avatar = None;
            }
        }
    }

    fn apply_decoded_avatar(&mut self, result: AvatarDecode) {
        match result {
            Ok(image) => {
                let (w, h) = image.dimensions();
                if self.set_avatar_image(image) {
                    log::debug!("Avatar decoded ({w}x{h})");
                } else {
                    log::debug!("Decoded avatar discarded: capsule sealed");
                }
            }
            Err(err) => log::warn!("Avatar decode failed, keeping placeholder: {err}"),
        }
    }

    fn regenerate(&mut self, kind: SurfaceKind) {
        let sealed = self.sequencer.phase().is_sealed();
        if let Some(image) = self.compositor.render(kind, &self.profile, sealed) {
            self.textures
                .replace(kind, self.binding.surface_node(kind), image);
        }
    }
}

fn decode_avatar_bytes(bytes: &[u8]) -> AvatarDecode {
    let image = image::load_from_memory(bytes)?;
    Ok(image.to_rgba8())
}
