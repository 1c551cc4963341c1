use ab_glyph::{Font, FontArc, PxScale, ScaleFont};

use crate::errors::Result;

/// A parsed font used to rasterize surface text.
///
/// The crate ships no font; the host supplies TTF/OTF bytes.
#[derive(Clone)]
pub struct Typeface {
    font: FontArc,
}

impl std::fmt::Debug for Typeface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Typeface").finish_non_exhaustive()
    }
}

impl Typeface {
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let font = FontArc::try_from_vec(data)?;
        Ok(Self { font })
    }

    #[must_use]
    pub fn font(&self) -> &FontArc {
        &self.font
    }

    /// Horizontal advance of a single line of `text` at `px` size, kerning included.
    #[must_use]
    pub fn measure(&self, text: &str, px: f32) -> f32 {
        let scaled = self.font.as_scaled(PxScale::from(px));
        let mut width = 0.0;
        let mut previous = None;
        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                width += scaled.kern(prev, id);
            }
            width += scaled.h_advance(id);
            previous = Some(id);
        }
        width
    }

    /// Ascent minus descent at `px` size.
    #[must_use]
    pub fn line_height(&self, px: f32) -> f32 {
        let scaled = self.font.as_scaled(PxScale::from(px));
        scaled.ascent() - scaled.descent()
    }
}
