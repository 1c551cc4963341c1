//! Animation module
//!
//! - [`Easing`]: the cubic ease-in-out curve driving the lid
//! - [`SealSequencer`]: the one-shot Idle → Sealing → Sealed phase machine
//! - [`LidArticulation`]: open/closed lid orientations and their slerp
//! - [`MotionDriver`]: idle spin/bob and the accelerated spin while sealing

pub mod easing;
pub mod lid;
pub mod motion;
pub mod sequencer;

pub use easing::Easing;
pub use lid::{LidArticulation, LidOrientationPair};
pub use motion::MotionDriver;
pub use sequencer::{AnimationPhase, SealEvent, SealProgress, SealSequencer};
