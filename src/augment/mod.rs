//! The overlay augmenter and its configuration.

/// JSON configuration and validation.
pub mod config;
/// Batch orchestration.
pub mod overlay_font;
/// Typed payloads accepted by the augmenter.
pub mod payload;
