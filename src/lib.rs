#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

//! Scene animation and procedural-surface controller for a personalised,
//! sealable 3D capsule.

pub mod animation;
pub mod capsule;
pub mod errors;
pub mod export;
pub mod profile;
pub mod resources;
pub mod scene;
pub mod settings;
pub mod surface;
pub mod utils;

pub use animation::{AnimationPhase, SealEvent, SealProgress};
pub use capsule::Capsule;
pub use errors::{CapsuleError, Result};
pub use export::ExportedFrame;
pub use profile::Profile;
pub use resources::{SurfaceKind, SurfaceTexture, Typeface};
pub use scene::{NodeHandle, Scene, SceneBinding, SceneGraph, Transform};
pub use settings::CapsuleSettings;
pub use surface::SurfaceCompositor;
