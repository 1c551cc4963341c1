//! Capsule Settings
//!
//! Every tuned constant of the capsule lives here: seal timing and easing
//! breakpoints, idle motion rates, surface canvas sizes and font thresholds,
//! and the part names the binding resolver looks for.
//!
//! The defaults are tuned for one specific capsule asset. They are plain
//! configuration, so a host can override any subset from JSON:
//!
//! ```rust,ignore
//! use capsule::settings::CapsuleSettings;
//!
//! let settings = CapsuleSettings::from_json_str(r#"{ "seal": { "duration_secs": 3.0 } }"#)?;
//! assert_eq!(settings.seal.duration_secs, 3.0);
//! assert_eq!(settings.nodes.lid, "Lid");
//! ```

use std::f32::consts::PI;
use std::path::Path;
use std::time::Duration;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::surface::layout::FontSizePolicy;

/// Top-level configuration for a [`Capsule`](crate::Capsule).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CapsuleSettings {
    pub seal: SealSettings,
    pub motion: MotionSettings,
    pub surface: SurfaceSettings,
    pub nodes: NodeNames,
}

impl CapsuleSettings {
    /// Parses settings from a JSON document. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON settings file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json_str(&text)?;
        log::debug!("Loaded capsule settings from {}", path.as_ref().display());
        Ok(settings)
    }
}

// ---------------------------------------------------------------------------
// Seal sequence
// ---------------------------------------------------------------------------

/// Timing and shape of the one-shot sealing animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SealSettings {
    /// Total wall-clock length of the sequence.
    pub duration_secs: f32,
    /// Fraction of the eased timeline within which the lid finishes closing.
    pub lid_close_fraction: f32,
    /// Peak of the spin-intensity envelope, reached at the midpoint.
    pub spin_peak: f32,
    /// Local rotation (radians) composed onto the closed lid to get the open lid.
    pub lid_open_angle: f32,
    /// Axis of the lid-open rotation in the lid's local frame.
    pub lid_open_axis: [f32; 3],
}

impl Default for SealSettings {
    fn default() -> Self {
        Self {
            duration_secs: 2.3,
            lid_close_fraction: 0.72,
            spin_peak: 0.75,
            lid_open_angle: -0.72 * PI,
            lid_open_axis: [1.0, 0.0, 0.0],
        }
    }
}

impl SealSettings {
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::try_from_secs_f32(self.duration_secs).unwrap_or(Duration::ZERO)
    }

    /// The fixed rotation that turns the captured closed orientation into the open one.
    #[must_use]
    pub fn lid_open_offset(&self) -> Quat {
        let axis = Vec3::from_array(self.lid_open_axis).try_normalize().unwrap_or(Vec3::X);
        Quat::from_axis_angle(axis, self.lid_open_angle)
    }
}

// ---------------------------------------------------------------------------
// Idle / seal motion
// ---------------------------------------------------------------------------

/// Whole-object motion applied every frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionSettings {
    /// Constant yaw rate while idle (radians per second).
    pub idle_yaw_rate: f32,
    /// Extra yaw rate per unit of spin intensity while sealing.
    pub spin_multiplier: f32,
    /// Vertical bob amplitude (scene units).
    pub bob_amplitude: f32,
    /// Vertical bob period (seconds).
    pub bob_period_secs: f32,
    /// Upper bound on the per-frame delta fed to motion.
    pub max_frame_delta_secs: f32,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            idle_yaw_rate: 0.35,
            spin_multiplier: 4.0,
            bob_amplitude: 0.02,
            bob_period_secs: 5.7,
            max_frame_delta_secs: 0.05,
        }
    }
}

impl MotionSettings {
    #[must_use]
    pub fn max_frame_delta(&self) -> Duration {
        Duration::try_from_secs_f32(self.max_frame_delta_secs).unwrap_or(Duration::ZERO)
    }
}

// ---------------------------------------------------------------------------
// Surfaces
// ---------------------------------------------------------------------------

/// RGBA colours used by the surface compositor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: [u8; 4],
    pub panel: [u8; 4],
    pub foreground: [u8; 4],
    pub accent: [u8; 4],
    pub sealed_background: [u8; 4],
    pub sealed_foreground: [u8; 4],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: [12, 18, 32, 255],
            panel: [28, 40, 64, 255],
            foreground: [232, 240, 255, 255],
            accent: [96, 196, 255, 255],
            sealed_background: [34, 20, 8, 255],
            sealed_foreground: [255, 196, 92, 255],
        }
    }
}

/// Canvas sizes, layout and text of the three display surfaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceSettings {
    pub lid_label_size: [u32; 2],
    pub name_size: [u32; 2],
    pub avatar_size: [u32; 2],
    pub name_font: FontSizePolicy,
    pub title_font_size: f32,
    pub subtitle_font_size: f32,
    /// Inset of the avatar clip region from the canvas edge.
    pub avatar_padding: f32,
    pub corner_radius: f32,
    pub palette: Palette,
    pub lid_title: String,
    pub lid_subtitle: String,
    pub sealed_stamp: String,
    pub name_placeholder: String,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            lid_label_size: [512, 512],
            name_size: [1024, 256],
            avatar_size: [512, 512],
            name_font: FontSizePolicy::default(),
            title_font_size: 72.0,
            subtitle_font_size: 32.0,
            avatar_padding: 24.0,
            corner_radius: 48.0,
            palette: Palette::default(),
            lid_title: "TIME CAPSULE".to_string(),
            lid_subtitle: "open until sealed".to_string(),
            sealed_stamp: "SEALED".to_string(),
            name_placeholder: "your name".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Scene part names
// ---------------------------------------------------------------------------

/// Names the binding resolver matches exactly against the loaded scene graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeNames {
    pub lid: String,
    /// Accepted when no node carries the primary lid name.
    pub lid_alternate: String,
    pub base: String,
    pub lid_screen: String,
    pub name_screen: String,
    pub avatar_screen: String,
}

impl Default for NodeNames {
    fn default() -> Self {
        Self {
            lid: "Lid".to_string(),
            lid_alternate: "Cap".to_string(),
            base: "Base".to_string(),
            lid_screen: "LidScreen".to_string(),
            name_screen: "NameScreen".to_string(),
            avatar_screen: "AvatarScreen".to_string(),
        }
    }
}
