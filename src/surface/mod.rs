//! Surface compositor
//!
//! Turns profile data into the raster textures shown on the capsule's
//! display surfaces. [`layout`] holds the pure sizing rules (font-size
//! policy, cover fit); [`compositor`] does the drawing.

pub mod compositor;
pub mod layout;

pub use compositor::SurfaceCompositor;
pub use layout::{CoverFit, FontSizePolicy};
