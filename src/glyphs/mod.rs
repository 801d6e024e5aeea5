//! Symbol alphabet, font discovery and glyph rasterization.

/// The fixed symbol set overlays are spelled from.
pub mod alphabet;
/// Font file discovery.
pub mod catalog;
/// Text to coverage-mask rendering.
pub mod raster;
