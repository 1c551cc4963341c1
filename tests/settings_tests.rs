//! Settings Tests
//!
//! Tests for:
//! - Defaults of every tuned constant
//! - Partial JSON overrides
//! - Error mapping for malformed or missing configuration

use std::f32::consts::PI;
use std::time::Duration;

use glam::Quat;

use capsule::errors::CapsuleError;
use capsule::settings::CapsuleSettings;

// ============================================================================
// Defaults
// ============================================================================

#[test]
fn default_seal_timing() {
    let settings = CapsuleSettings::default();
    assert_eq!(settings.seal.duration(), Duration::from_secs_f32(2.3));
    assert_eq!(settings.seal.lid_close_fraction, 0.72);
    assert_eq!(settings.seal.spin_peak, 0.75);
}

#[test]
fn default_motion() {
    let motion = CapsuleSettings::default().motion;
    assert_eq!(motion.idle_yaw_rate, 0.35);
    assert_eq!(motion.spin_multiplier, 4.0);
    assert_eq!(motion.max_frame_delta(), Duration::from_millis(50));
}

#[test]
fn default_node_names() {
    let nodes = CapsuleSettings::default().nodes;
    assert_eq!(nodes.lid, "Lid");
    assert_eq!(nodes.lid_alternate, "Cap");
    assert_eq!(nodes.base, "Base");
    assert_eq!(nodes.lid_screen, "LidScreen");
    assert_eq!(nodes.name_screen, "NameScreen");
    assert_eq!(nodes.avatar_screen, "AvatarScreen");
}

#[test]
fn default_lid_offset_rotates_about_x() {
    let offset = CapsuleSettings::default().seal.lid_open_offset();
    let expected = Quat::from_rotation_x(-0.72 * PI);
    assert!(offset.dot(expected).abs() > 1.0 - 1e-6);
}

#[test]
fn degenerate_lid_axis_falls_back_to_x() {
    let mut settings = CapsuleSettings::default();
    settings.seal.lid_open_axis = [0.0, 0.0, 0.0];
    let offset = settings.seal.lid_open_offset();
    assert!(offset.dot(Quat::from_rotation_x(-0.72 * PI)).abs() > 1.0 - 1e-6);
}

#[test]
fn invalid_durations_clamp_to_zero() {
    let mut settings = CapsuleSettings::default();
    settings.seal.duration_secs = -1.0;
    assert_eq!(settings.seal.duration(), Duration::ZERO);
    settings.motion.max_frame_delta_secs = f32::NAN;
    assert_eq!(settings.motion.max_frame_delta(), Duration::ZERO);
}

// ============================================================================
// JSON
// ============================================================================

#[test]
fn partial_json_keeps_other_defaults() -> anyhow::Result<()> {
    let settings = CapsuleSettings::from_json_str(
        r#"{
            "seal": { "duration_secs": 3.0 },
            "nodes": { "lid": "Top" },
            "surface": { "name_font": { "base_max_chars": 10 } }
        }"#,
    )?;

    assert_eq!(settings.seal.duration_secs, 3.0);
    assert_eq!(settings.seal.lid_close_fraction, 0.72);
    assert_eq!(settings.nodes.lid, "Top");
    assert_eq!(settings.nodes.lid_alternate, "Cap");
    assert_eq!(settings.surface.name_font.base_max_chars, 10);
    assert_eq!(settings.surface.name_font.reduced_max_chars, 18);
    assert_eq!(settings.motion, CapsuleSettings::default().motion);
    Ok(())
}

#[test]
fn empty_json_is_default() -> anyhow::Result<()> {
    assert_eq!(CapsuleSettings::from_json_str("{}")?, CapsuleSettings::default());
    Ok(())
}

#[test]
fn settings_survive_serialization() -> anyhow::Result<()> {
    let mut settings = CapsuleSettings::default();
    settings.surface.lid_title = "OUR CAPSULE".to_string();
    let json = serde_json::to_string(&settings)?;
    assert_eq!(CapsuleSettings::from_json_str(&json)?, settings);
    Ok(())
}

#[test]
fn malformed_json_is_config_error() {
    let result = CapsuleSettings::from_json_str(r#"{ "seal": { "duration_secs": "slow" } }"#);
    assert!(matches!(result, Err(CapsuleError::Config(_))));
}

#[test]
fn missing_file_is_io_error() {
    let result = CapsuleSettings::from_json_file("/definitely/not/here/capsule.json");
    assert!(matches!(result, Err(CapsuleError::Io(_))));
}
