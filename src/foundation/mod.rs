/// Error taxonomy shared by every stage.
pub mod error;
/// Pixel-range conversions and normalization helpers.
pub mod math;
