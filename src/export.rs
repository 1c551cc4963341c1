//! Final-frame export.
//!
//! The host hands over the raster contents of its last rendered frame; this
//! module names and encodes it for download.

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};

use crate::errors::{CapsuleError, Result};
use crate::utils::slug::slugify;

/// Prefix of every exported filename.
pub const EXPORT_PREFIX: &str = "time-capsule";

/// An encoded frame ready to hand to a download mechanism.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFrame {
    pub filename: String,
    pub png: Vec<u8>,
}

/// `time-capsule-<slug>.png`, slugging the nickname.
#[must_use]
pub fn export_filename(nickname: &str) -> String {
    format!("{EXPORT_PREFIX}-{}.png", slugify(nickname))
}

/// Encodes `frame` as PNG.
pub fn encode_png(frame: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    frame
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| CapsuleError::Encode(e.to_string()))?;
    Ok(bytes)
}

/// Names and encodes a frame for the given nickname.
pub fn export_frame(nickname: &str, frame: &RgbaImage) -> Result<ExportedFrame> {
    let png = encode_png(frame)?;
    let filename = export_filename(nickname);
    log::info!("Exported {filename} ({} bytes)", png.len());
    Ok(ExportedFrame { filename, png })
}
