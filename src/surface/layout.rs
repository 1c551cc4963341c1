use serde::{Deserialize, Serialize};

use crate::resources::canvas::Rect;

/// Font size for the name surface, chosen from the nickname length alone so
/// the text fits the fixed-size surface without per-glyph measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSizePolicy {
    pub base_size: f32,
    pub reduced_size: f32,
    pub small_size: f32,
    /// Longest nickname (in chars) drawn at `base_size`.
    pub base_max_chars: usize,
    /// Longest nickname (in chars) drawn at `reduced_size`.
    pub reduced_max_chars: usize,
}

impl Default for FontSizePolicy {
    fn default() -> Self {
        Self {
            base_size: 64.0,
            reduced_size: 52.0,
            small_size: 42.0,
            base_max_chars: 14,
            reduced_max_chars: 18,
        }
    }
}

impl FontSizePolicy {
    #[must_use]
    pub fn size_for_len(&self, chars: usize) -> f32 {
        if chars <= self.base_max_chars {
            self.base_size
        } else if chars <= self.reduced_max_chars {
            self.reduced_size
        } else {
            self.small_size
        }
    }

    #[must_use]
    pub fn size_for(&self, text: &str) -> f32 {
        self.size_for_len(text.chars().count())
    }
}

/// Placement of an image scaled to fill a region ("cover").
///
/// `scale = max(region_w / image_w, region_h / image_h)`, centered on the
/// region. Aspect ratio is preserved; whatever overhangs the region is
/// cropped by the caller's clip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverFit {
    pub scale: f32,
    pub draw_width: f32,
    pub draw_height: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl CoverFit {
    /// `None` for degenerate images or regions.
    #[must_use]
    pub fn compute(region: Rect, image_width: u32, image_height: u32) -> Option<Self> {
        if image_width == 0 || image_height == 0 || region.width <= 0.0 || region.height <= 0.0 {
            return None;
        }
        let (iw, ih) = (image_width as f32, image_height as f32);
        let scale = (region.width / iw).max(region.height / ih);
        let draw_width = iw * scale;
        let draw_height = ih * scale;
        Some(Self {
            scale,
            draw_width,
            draw_height,
            offset_x: region.x + (region.width - draw_width) * 0.5,
            offset_y: region.y + (region.height - draw_height) * 0.5,
        })
    }

    #[must_use]
    pub fn dest_rect(&self) -> Rect {
        Rect::new(self.offset_x, self.offset_y, self.draw_width, self.draw_height)
    }
}
