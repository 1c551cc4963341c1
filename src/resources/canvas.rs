//! Off-screen raster canvas.
//!
//! A small software 2D context over an [`RgbaImage`]: solid and rounded-rect
//! fills, a rounded-rect clip, scaled image blits and centered text. All
//! drawing is source-over blended and clipped to the canvas bounds.

use ab_glyph::{Font, PxScale, ScaleFont, point};
use glam::Vec2;
use image::{Rgba, RgbaImage};

use crate::resources::typeface::Typeface;

/// Axis-aligned rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(0.0, 0.0, width as f32, height as f32)
    }

    /// Shrinks the rectangle by `amount` on every side.
    #[must_use]
    pub fn inset(&self, amount: f32) -> Self {
        Self::new(
            self.x + amount,
            self.y + amount,
            (self.width - 2.0 * amount).max(0.0),
            (self.height - 2.0 * amount).max(0.0),
        )
    }

    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Anti-aliased coverage of the point `p` by this rectangle with corners
    /// rounded to `radius`.
    #[must_use]
    pub fn rounded_coverage(&self, p: Vec2, radius: f32) -> f32 {
        let half = Vec2::new(self.width, self.height) * 0.5;
        let radius = radius.clamp(0.0, half.min_element());
        // Signed distance to a rounded box centered on the origin.
        let q = (p - self.center()).abs() - half + Vec2::splat(radius);
        let distance = q.max(Vec2::ZERO).length() + q.max_element().min(0.0) - radius;
        (0.5 - distance).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy)]
struct Clip {
    rect: Rect,
    radius: f32,
}

pub struct Canvas {
    image: RgbaImage,
    clip: Option<Clip>,
}

impl Canvas {
    /// A fully transparent canvas.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
            clip: None,
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width(), self.height())
    }

    #[must_use]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    #[must_use]
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Restricts subsequent drawing to a rounded rectangle.
    pub fn set_clip_rounded(&mut self, rect: Rect, radius: f32) {
        self.clip = Some(Clip { rect, radius });
    }

    pub fn clear_clip(&mut self) {
        self.clip = None;
    }

    pub fn fill(&mut self, color: Rgba<u8>) {
        self.fill_rect(self.bounds(), color);
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Rgba<u8>) {
        self.fill_rounded_rect(rect, 0.0, color);
    }

    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Rgba<u8>) {
        let Some((x0, y0, x1, y1)) = self.pixel_span(rect) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let p = pixel_center(x, y);
                let coverage = rect.rounded_coverage(p, radius);
                self.blend(x, y, color, coverage);
            }
        }
    }

    /// Outline of a rounded rectangle, `thickness` pixels wide and drawn
    /// inside `rect`.
    pub fn stroke_rounded_rect(&mut self, rect: Rect, radius: f32, thickness: f32, color: Rgba<u8>) {
        let inner = rect.inset(thickness);
        let inner_radius = (radius - thickness).max(0.0);
        let Some((x0, y0, x1, y1)) = self.pixel_span(rect) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let p = pixel_center(x, y);
                let coverage =
                    rect.rounded_coverage(p, radius) - inner.rounded_coverage(p, inner_radius);
                self.blend(x, y, color, coverage);
            }
        }
    }

    /// Blits `src` scaled into `dest` with nearest sampling. `dest` may extend
    /// past the canvas or the clip; the excess is cropped.
    pub fn draw_image(&mut self, src: &RgbaImage, dest: Rect) {
        let (src_w, src_h) = src.dimensions();
        if src_w == 0 || src_h == 0 || dest.width <= 0.0 || dest.height <= 0.0 {
            return;
        }
        let Some((x0, y0, x1, y1)) = self.pixel_span(dest) else {
            return;
        };

        for y in y0..y1 {
            for x in x0..x1 {
                let p = pixel_center(x, y);
                let u = (p.x - dest.x) / dest.width;
                let v = (p.y - dest.y) / dest.height;
                if !(0.0..1.0).contains(&u) || !(0.0..1.0).contains(&v) {
                    continue;
                }
                let sx = ((u * src_w as f32) as u32).min(src_w - 1);
                let sy = ((v * src_h as f32) as u32).min(src_h - 1);
                let texel = *src.get_pixel(sx, sy);
                self.blend(x, y, texel, 1.0);
            }
        }
    }

    /// Draws one line of text centered on `center`. Returns the laid-out width.
    pub fn fill_text_centered(
        &mut self,
        typeface: &Typeface,
        text: &str,
        px: f32,
        center: Vec2,
        color: Rgba<u8>,
    ) -> f32 {
        let font = typeface.font();
        let scale = PxScale::from(px);
        let scaled = font.as_scaled(scale);

        let width = typeface.measure(text, px);
        let line_height = typeface.line_height(px);
        let origin_x = center.x - width * 0.5;
        let baseline = center.y - line_height * 0.5 + scaled.ascent();

        let mut caret = origin_x;
        let mut previous = None;
        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(scale, point(caret, baseline));
            caret += scaled.h_advance(id);
            previous = Some(id);

            let Some(outlined) = font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            let (left, top) = (bounds.min.x.floor() as i64, bounds.min.y.floor() as i64);
            outlined.draw(|gx, gy, coverage| {
                let x = left + i64::from(gx);
                let y = top + i64::from(gy);
                if x >= 0 && y >= 0 {
                    self.blend(x as u32, y as u32, color, coverage);
                }
            });
        }

        width
    }

    /// Integer pixel range covered by `rect`, intersected with the canvas.
    fn pixel_span(&self, rect: Rect) -> Option<(u32, u32, u32, u32)> {
        let x0 = rect.x.floor().max(0.0);
        let y0 = rect.y.floor().max(0.0);
        let x1 = rect.right().ceil().min(self.width() as f32);
        let y1 = rect.bottom().ceil().min(self.height() as f32);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    /// Source-over blend of `color` at `coverage`, attenuated by the clip.
    fn blend(&mut self, x: u32, y: u32, color: Rgba<u8>, coverage: f32) {
        if x >= self.width() || y >= self.height() {
            return;
        }
        let mut alpha = coverage.clamp(0.0, 1.0) * f32::from(color[3]) / 255.0;
        if let Some(clip) = self.clip {
            alpha *= clip.rect.rounded_coverage(pixel_center(x, y), clip.radius);
        }
        if alpha <= 0.0 {
            return;
        }

        let dst = self.image.get_pixel_mut(x, y);
        let keep = 1.0 - alpha;
        for c in 0..3 {
            let blended = f32::from(color[c]) * alpha + f32::from(dst[c]) * keep;
            dst[c] = blended.round().clamp(0.0, 255.0) as u8;
        }
        let out_alpha = alpha * 255.0 + f32::from(dst[3]) * keep;
        dst[3] = out_alpha.round().clamp(0.0, 255.0) as u8;
    }
}

#[inline]
fn pixel_center(x: u32, y: u32) -> Vec2 {
    Vec2::new(x as f32 + 0.5, y as f32 + 0.5)
}
