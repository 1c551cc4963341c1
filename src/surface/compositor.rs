use glam::Vec2;
use image::{Rgba, RgbaImage};

use crate::profile::Profile;
use crate::resources::canvas::{Canvas, Rect};
use crate::resources::texture::SurfaceKind;
use crate::resources::typeface::Typeface;
use crate::settings::SurfaceSettings;
use crate::surface::layout::CoverFit;

/// Inset of the decorative panel from the canvas edge.
const PANEL_MARGIN: f32 = 16.0;
const BORDER_WIDTH: f32 = 6.0;
/// Placeholder text is drawn at this alpha.
const PLACEHOLDER_ALPHA: u8 = 150;

/// Draws the lid label, name and avatar surfaces onto fresh canvases.
///
/// Every call produces a whole new image; there is no partial update.
#[derive(Debug)]
pub struct SurfaceCompositor {
    settings: SurfaceSettings,
    typeface: Option<Typeface>,
    warned_missing_typeface: bool,
}

impl SurfaceCompositor {
    #[must_use]
    pub fn new(settings: SurfaceSettings) -> Self {
        Self {
            settings,
            typeface: None,
            warned_missing_typeface: false,
        }
    }

    pub fn set_typeface(&mut self, typeface: Typeface) {
        self.typeface = Some(typeface);
        self.warned_missing_typeface = false;
    }

    #[must_use]
    pub fn has_typeface(&self) -> bool {
        self.typeface.is_some()
    }

    #[must_use]
    pub fn settings(&self) -> &SurfaceSettings {
        &self.settings
    }

    /// Renders the surface `kind` from the current profile. `None` means the
    /// surface has no data yet and should keep its placeholder.
    pub fn render(&mut self, kind: SurfaceKind, profile: &Profile, sealed: bool) -> Option<RgbaImage> {
        match kind {
            SurfaceKind::LidLabel => Some(self.render_lid_label(sealed)),
            SurfaceKind::Name => Some(self.render_name(profile.nickname())),
            SurfaceKind::Avatar => profile.avatar().map(|image| self.render_avatar(image)),
        }
    }

    /// Static branded label. The sealed variant swaps the palette and
    /// replaces the subtitle with the sealed stamp.
    pub fn render_lid_label(&mut self, sealed: bool) -> RgbaImage {
        let [w, h] = self.settings.lid_label_size;
        let palette = &self.settings.palette;
        let (background, foreground, border) = if sealed {
            (palette.sealed_background, palette.sealed_foreground, palette.sealed_foreground)
        } else {
            (palette.background, palette.foreground, palette.accent)
        };
        let panel = Rgba(palette.panel);
        let radius = self.settings.corner_radius;

        let mut canvas = Canvas::new(w, h);
        canvas.fill(Rgba(background));
        let frame = canvas.bounds().inset(PANEL_MARGIN);
        if !sealed {
            canvas.fill_rounded_rect(frame, radius, panel);
        }
        canvas.stroke_rounded_rect(frame, radius, BORDER_WIDTH, Rgba(border));

        let title = self.settings.lid_title.clone();
        let subtitle = if sealed {
            self.settings.sealed_stamp.clone()
        } else {
            self.settings.lid_subtitle.clone()
        };
        let (title_px, subtitle_px) = (self.settings.title_font_size, self.settings.subtitle_font_size);
        let (wf, hf) = (w as f32, h as f32);

        self.draw_text(&mut canvas, &title, title_px, Vec2::new(wf * 0.5, hf * 0.42), Rgba(foreground));
        self.draw_text(&mut canvas, &subtitle, subtitle_px, Vec2::new(wf * 0.5, hf * 0.62), Rgba(border));

        canvas.into_image()
    }

    /// Nickname centered on the name plate, sized by the font-size policy.
    /// An empty nickname shows the placeholder prompt.
    pub fn render_name(&mut self, nickname: &str) -> RgbaImage {
        let [w, h] = self.settings.name_size;
        let palette = &self.settings.palette;
        let (background, panel, accent) = (palette.background, palette.panel, palette.accent);
        let mut foreground = palette.foreground;
        let radius = self.settings.corner_radius;

        let mut canvas = Canvas::new(w, h);
        canvas.fill(Rgba(background));
        let frame = canvas.bounds().inset(PANEL_MARGIN);
        canvas.fill_rounded_rect(frame, radius, Rgba(panel));
        canvas.stroke_rounded_rect(frame, radius, BORDER_WIDTH, Rgba(accent));

        let text = if nickname.is_empty() {
            foreground[3] = PLACEHOLDER_ALPHA;
            self.settings.name_placeholder.clone()
        } else {
            nickname.to_string()
        };
        let px = self.settings.name_font.size_for(&text);
        self.draw_text(&mut canvas, &text, px, frame.center(), Rgba(foreground));

        canvas.into_image()
    }

    /// The padded rounded-rect region the avatar is clipped to.
    #[must_use]
    pub fn avatar_region(&self) -> Rect {
        let [w, h] = self.settings.avatar_size;
        Rect::from_size(w, h).inset(self.settings.avatar_padding)
    }

    /// Draws `image` cover-scaled into the avatar region.
    #[must_use]
    pub fn render_avatar(&self, image: &RgbaImage) -> RgbaImage {
        let [w, h] = self.settings.avatar_size;
        let palette = &self.settings.palette;
        let radius = self.settings.corner_radius;
        let region = self.avatar_region();

        let mut canvas = Canvas::new(w, h);
        canvas.fill(Rgba(palette.background));
        canvas.fill_rounded_rect(region, radius, Rgba(palette.panel));

        if let Some(fit) = CoverFit::compute(region, image.width(), image.height()) {
            canvas.set_clip_rounded(region, radius);
            canvas.draw_image(image, fit.dest_rect());
            canvas.clear_clip();
        }
        canvas.stroke_rounded_rect(region, radius, BORDER_WIDTH, Rgba(palette.accent));

        canvas.into_image()
    }

    fn draw_text(&mut self, canvas: &mut Canvas, text: &str, px: f32, center: Vec2, color: Rgba<u8>) {
        match &self.typeface {
            Some(typeface) => {
                canvas.fill_text_centered(typeface, text, px, center, color);
            }
            None => {
                if !self.warned_missing_typeface {
                    log::warn!("No typeface installed, surface text will not be drawn");
                    self.warned_missing_typeface = true;
                }
            }
        }
    }
}
