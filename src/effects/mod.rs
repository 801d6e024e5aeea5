//! Overlay distortion and compositing.

/// Separable Gaussian blur on 8-bit grayscale.
pub mod blur;
/// Multiplicative overlay blending in floating point.
pub mod composite;
/// The ordered distortion pipeline applied to each overlay.
pub mod distort;
/// Grid-driven local elastic warp.
pub mod warp;
