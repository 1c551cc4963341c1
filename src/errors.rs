//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! Almost nothing in the capsule controller fails: missing scene parts,
//! rejected seal triggers and absent avatars all degrade to a default or
//! placeholder instead of surfacing an error. [`CapsuleError`] only covers
//! the explicitly fallible boundaries:
//! - Configuration loading
//! - Avatar decoding and typeface loading
//! - Frame export
//!
//! # Usage
//!
//! Fallible APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, CapsuleError>`.
//!
//! ```rust,ignore
//! use capsule::errors::Result;
//! use capsule::settings::CapsuleSettings;
//!
//! fn load() -> Result<CapsuleSettings> {
//!     CapsuleSettings::from_json_str("{}")
//! }
//! ```

use thiserror::Error;

/// The main error type for the capsule controller.
#[derive(Error, Debug)]
pub enum CapsuleError {
    // ========================================================================
    // Asset Errors
    // ========================================================================
    /// The capsule asset could not be loaded by the host.
    #[error("Asset load failed: {0}")]
    AssetLoad(String),

    /// Avatar image decoding error.
    #[error("Image decode error: {0}")]
    ImageDecode(String),

    /// The supplied font data could not be parsed.
    #[error("Invalid font data: {0}")]
    Font(String),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// JSON parsing error while reading settings.
    #[error("Settings parse error: {0}")]
    Config(#[from] serde_json::Error),

    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ========================================================================
    // Export Errors
    // ========================================================================
    /// Export was requested before the capsule reached its sealed state.
    #[error("Capsule is not sealed yet")]
    NotSealed,

    /// The final frame could not be encoded.
    #[error("Image encode error: {0}")]
    Encode(String),
}

impl From<image::ImageError> for CapsuleError {
    fn from(err: image::ImageError) -> Self {
        CapsuleError::ImageDecode(err.to_string())
    }
}

impl From<ab_glyph::InvalidFont> for CapsuleError {
    fn from(err: ab_glyph::InvalidFont) -> Self {
        CapsuleError::Font(err.to_string())
    }
}

/// Alias for `Result<T, CapsuleError>`.
pub type Result<T> = std::result::Result<T, CapsuleError>;
