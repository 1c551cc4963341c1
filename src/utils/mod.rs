//! Utility Module
//!
//! - [`FrameClock`]: frame timing with a capped per-frame delta
//! - [`slug`]: filename-safe slugs

pub mod slug;
pub mod time;

pub use slug::slugify;
pub use time::{FrameClock, FrameTime};
