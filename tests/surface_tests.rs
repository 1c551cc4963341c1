//! Surface Compositor Tests
//!
//! Tests for:
//! - FontSizePolicy: length thresholds and boundaries
//! - CoverFit: scale, overhang and centering
//! - SurfaceCompositor: canvas sizes, avatar clipping, lid label variants
//! - TextureSlots: replacement and versioning
//! - Typeface: metrics and rejection of invalid font data
//! - Text rendering with a real font: centering, long names, sealed label

use image::{Rgba, RgbaImage};

use capsule::errors::CapsuleError;
use capsule::profile::Profile;
use capsule::resources::{Rect, SurfaceKind, TextureSlots, Typeface};
use capsule::settings::SurfaceSettings;
use capsule::surface::{CoverFit, FontSizePolicy, SurfaceCompositor};

const EPSILON: f32 = 1e-4;

/// DejaVu Sans, Bitstream Vera license (see `fonts/DejaVuSans-LICENSE.txt`).
const DEJAVU_SANS: &[u8] = include_bytes!("fonts/DejaVuSans.ttf");

const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn compositor() -> SurfaceCompositor {
    SurfaceCompositor::new(SurfaceSettings::default())
}

fn typeface() -> Typeface {
    Typeface::from_bytes(DEJAVU_SANS.to_vec()).expect("bundled font parses")
}

fn compositor_with_font() -> SurfaceCompositor {
    let mut compositor = compositor();
    compositor.set_typeface(typeface());
    compositor
}

/// Bounding box `(min_x, min_y, max_x, max_y)` of the pixels that differ
/// between `a` and `b`, with the number of differing pixels.
fn diff_bounds(a: &RgbaImage, b: &RgbaImage) -> Option<((u32, u32, u32, u32), usize)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    let mut changed = 0;
    for (x, y, pixel) in a.enumerate_pixels() {
        if pixel == b.get_pixel(x, y) {
            continue;
        }
        changed += 1;
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
    bounds.map(|b| (b, changed))
}

/// 2x1 image: red on the left, blue on the right.
fn red_blue() -> RgbaImage {
    let mut image = RgbaImage::new(2, 1);
    image.put_pixel(0, 0, RED);
    image.put_pixel(1, 0, BLUE);
    image
}

// ============================================================================
// Font Size Policy
// ============================================================================

#[test]
fn font_size_by_length() {
    let policy = FontSizePolicy::default();
    assert_eq!(policy.size_for("abcdefghij"), 64.0);
    assert_eq!(policy.size_for("abcdefghijklmnop"), 52.0);
    assert_eq!(policy.size_for("abcdefghijklmnopqrst"), 42.0);
}

#[test]
fn font_size_boundaries() {
    let policy = FontSizePolicy::default();
    assert_eq!(policy.size_for_len(0), 64.0);
    assert_eq!(policy.size_for_len(14), 64.0);
    assert_eq!(policy.size_for_len(15), 52.0);
    assert_eq!(policy.size_for_len(18), 52.0);
    assert_eq!(policy.size_for_len(19), 42.0);
    assert_eq!(policy.size_for_len(500), 42.0);
}

#[test]
fn font_size_counts_chars_not_bytes() {
    let policy = FontSizePolicy::default();
    // 14 chars, 28 bytes.
    assert_eq!(policy.size_for("éééééééééééééé"), 64.0);
}

// ============================================================================
// Cover Fit
// ============================================================================

#[test]
fn cover_fit_wide_image_overhangs_horizontally() {
    let fit = CoverFit::compute(Rect::new(0.0, 0.0, 400.0, 400.0), 800, 400);
    let fit = fit.expect("non-degenerate input");
    assert!(approx(fit.scale, 1.0));
    assert!(approx(fit.draw_width, 800.0));
    assert!(approx(fit.draw_height, 400.0));
    assert!(approx(fit.offset_x, -200.0));
    assert!(approx(fit.offset_y, 0.0));
}

#[test]
fn cover_fit_tall_image_overhangs_vertically() {
    let fit = CoverFit::compute(Rect::new(10.0, 10.0, 100.0, 50.0), 100, 100)
        .expect("non-degenerate input");
    assert!(approx(fit.scale, 1.0));
    assert!(approx(fit.draw_width, 100.0));
    assert!(approx(fit.draw_height, 100.0));
    assert!(approx(fit.offset_x, 10.0));
    assert!(approx(fit.offset_y, -15.0));
}

#[test]
fn cover_fit_always_covers_region() {
    let region = Rect::new(24.0, 24.0, 464.0, 464.0);
    for (w, h) in [(1, 1), (3, 7), (1920, 1080), (600, 4000), (464, 464)] {
        let fit = CoverFit::compute(region, w, h).expect("non-degenerate input");
        assert!(fit.draw_width + EPSILON >= region.width, "{w}x{h}");
        assert!(fit.draw_height + EPSILON >= region.height, "{w}x{h}");
        // Aspect ratio preserved.
        assert!(approx(fit.draw_width / fit.draw_height, w as f32 / h as f32));
        // Centered.
        let dest = fit.dest_rect();
        assert!(approx(dest.center().x, region.center().x));
        assert!(approx(dest.center().y, region.center().y));
    }
}

#[test]
fn cover_fit_rejects_degenerate_input() {
    let region = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(CoverFit::compute(region, 0, 10).is_none());
    assert!(CoverFit::compute(region, 10, 0).is_none());
    assert!(CoverFit::compute(Rect::new(0.0, 0.0, 0.0, 10.0), 10, 10).is_none());
}

// ============================================================================
// Compositor
// ============================================================================

#[test]
fn surfaces_use_configured_sizes() {
    let mut compositor = compositor();
    let settings = SurfaceSettings::default();

    let lid = compositor.render_lid_label(false);
    assert_eq!([lid.width(), lid.height()], settings.lid_label_size);

    let name = compositor.render_name("Ada");
    assert_eq!([name.width(), name.height()], settings.name_size);

    let avatar = compositor.render_avatar(&red_blue());
    assert_eq!([avatar.width(), avatar.height()], settings.avatar_size);
}

#[test]
fn avatar_surface_needs_an_image() {
    let mut compositor = compositor();
    let mut profile = Profile::new();
    assert!(compositor.render(SurfaceKind::Avatar, &profile, false).is_none());

    profile.set_avatar(red_blue());
    assert!(compositor.render(SurfaceKind::Avatar, &profile, false).is_some());
}

#[test]
fn text_surfaces_render_without_typeface() {
    let mut compositor = compositor();
    assert!(!compositor.has_typeface());
    let profile = Profile::new();
    assert!(compositor.render(SurfaceKind::LidLabel, &profile, false).is_some());
    assert!(compositor.render(SurfaceKind::Name, &profile, false).is_some());
}

#[test]
fn avatar_is_cover_fitted_and_clipped() {
    let compositor = compositor();
    let palette = SurfaceSettings::default().palette;
    let avatar = compositor.render_avatar(&red_blue());

    // Region is (24, 24, 464, 464); the 2x1 image scales to 928x464 and
    // overhangs 232 px on each side.
    assert_eq!(*avatar.get_pixel(100, 256), RED);
    assert_eq!(*avatar.get_pixel(400, 256), BLUE);
    // Padding outside the region keeps the background.
    assert_eq!(*avatar.get_pixel(2, 2), Rgba(palette.background));
    assert_eq!(*avatar.get_pixel(509, 256), Rgba(palette.background));
}

#[test]
fn avatar_corners_are_clipped() {
    let compositor = compositor();
    let palette = SurfaceSettings::default().palette;
    let avatar = compositor.render_avatar(&red_blue());

    // Inside the region's bounding box but outside its rounded corner.
    let corner = avatar.get_pixel(25, 25);
    assert_ne!(*corner, RED);
    assert_eq!(*corner, Rgba(palette.background));
}

#[test]
fn avatar_region_is_padded() {
    let region = compositor().avatar_region();
    assert!(approx(region.x, 24.0));
    assert!(approx(region.y, 24.0));
    assert!(approx(region.width, 464.0));
    assert!(approx(region.height, 464.0));
}

#[test]
fn lid_label_changes_when_sealed() {
    let mut compositor = compositor();
    let palette = SurfaceSettings::default().palette;

    let open = compositor.render_lid_label(false);
    let sealed = compositor.render_lid_label(true);

    assert_eq!(*open.get_pixel(2, 2), Rgba(palette.background));
    assert_eq!(*sealed.get_pixel(2, 2), Rgba(palette.sealed_background));
    assert_ne!(open, sealed);
}

#[test]
fn name_plate_has_panel_behind_text() {
    let mut compositor = compositor();
    let palette = SurfaceSettings::default().palette;
    let name = compositor.render_name("");
    assert_eq!(*name.get_pixel(512, 128), Rgba(palette.panel));
    assert_eq!(*name.get_pixel(1, 1), Rgba(palette.background));
}

// ============================================================================
// Texture Slots
// ============================================================================

#[test]
fn texture_slot_replacement_bumps_version() {
    let mut slots = TextureSlots::new();
    assert!(slots.is_empty());
    assert_eq!(slots.version(SurfaceKind::Name), 0);

    let first_id = slots.replace(SurfaceKind::Name, None, RgbaImage::new(4, 4)).id();
    let second = slots.replace(SurfaceKind::Name, None, RgbaImage::new(8, 2));

    assert_eq!(second.version(), 2);
    assert_ne!(second.id(), first_id);
    assert_eq!((second.width(), second.height()), (8, 2));
    assert_eq!(slots.len(), 1);
}

#[test]
fn texture_slots_are_independent() {
    let mut slots = TextureSlots::new();
    slots.replace(SurfaceKind::Name, None, RgbaImage::new(1, 1));
    slots.replace(SurfaceKind::Name, None, RgbaImage::new(1, 1));
    slots.replace(SurfaceKind::LidLabel, None, RgbaImage::new(1, 1));

    assert_eq!(slots.version(SurfaceKind::Name), 2);
    assert_eq!(slots.version(SurfaceKind::LidLabel), 1);
    assert!(slots.get(SurfaceKind::Avatar).is_none());
    assert_eq!(slots.iter().count(), 2);
}

// ============================================================================
// Typeface
// ============================================================================

#[test]
fn typeface_rejects_garbage() {
    let result = Typeface::from_bytes(b"definitely not a font".to_vec());
    assert!(matches!(result, Err(CapsuleError::Font(_))));
}

#[test]
fn typeface_metrics() {
    let face = typeface();
    assert_eq!(face.measure("", 64.0), 0.0);

    let one = face.measure("A", 64.0);
    let two = face.measure("AA", 64.0);
    assert!(one > 0.0);
    assert!(two > one * 1.5);

    let line = face.line_height(64.0);
    assert!(line > 0.0);
    assert!((face.line_height(128.0) - 2.0 * line).abs() < 1e-3);
}

// ============================================================================
// Text Rendering
// ============================================================================

#[test]
fn nickname_is_centered_on_name_plate() {
    let blank = compositor().render_name("Ada");
    let mut compositor = compositor_with_font();
    assert!(compositor.has_typeface());
    let drawn = compositor.render_name("Ada");

    let ((x0, y0, x1, y1), changed) = diff_bounds(&blank, &drawn).expect("text drawn");
    assert!(changed > 100, "only {changed} pixels of ink");

    // Plate is 1024x256; its frame is centered on (512, 128).
    let cx = (x0 + x1) as f32 / 2.0;
    let cy = (y0 + y1) as f32 / 2.0;
    assert!((cx - 512.0).abs() < 6.0, "ink spans x {x0}..{x1}");
    assert!((cy - 128.0).abs() < 8.0, "ink spans y {y0}..{y1}");

    // Ink width tracks the measured advance at the policy's size.
    let advance = typeface().measure("Ada", FontSizePolicy::default().size_for("Ada"));
    assert!(((x1 - x0) as f32 - advance).abs() < 16.0);
}

#[test]
fn placeholder_text_is_drawn_for_empty_nickname() {
    let blank = compositor().render_name("");
    let drawn = compositor_with_font().render_name("");
    assert!(diff_bounds(&blank, &drawn).is_some());
}

#[test]
fn longest_nickname_renders() {
    let nickname = "W".repeat(24);
    let blank = compositor().render_name(&nickname);
    let drawn = compositor_with_font().render_name(&nickname);

    let ((x0, _, x1, _), _) = diff_bounds(&blank, &drawn).expect("text drawn");
    // Drawn at the small size, so wider than the base-size short name but
    // still on the canvas.
    assert!(x1 - x0 > 500);
    assert!(x1 < 1024);
}

#[test]
fn sealed_lid_label_draws_stamp() {
    let mut plain = compositor();
    let mut fonted = compositor_with_font();

    let open = fonted.render_lid_label(false);
    let sealed = fonted.render_lid_label(true);
    assert!(diff_bounds(&plain.render_lid_label(true), &sealed).is_some());
    assert!(diff_bounds(&plain.render_lid_label(false), &open).is_some());
    assert_ne!(open, sealed);
}
