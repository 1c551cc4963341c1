//! Raster resources
//!
//! - [`Canvas`]: software 2D drawing over an RGBA image
//! - [`Typeface`]: host-supplied font for surface text
//! - [`TextureSlots`]: the current texture of each display surface

pub mod canvas;
pub mod texture;
pub mod typeface;

pub use canvas::{Canvas, Rect};
pub use texture::{SurfaceKind, SurfaceTexture, TextureSlots};
pub use typeface::Typeface;
