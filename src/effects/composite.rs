//! Multiplicative overlay compositing on a floating-point working image.

use image::GrayImage;

use crate::foundation::{
    error::{OverlayError, OverlayResult},
    math::{EPS, minmax_normalize_in_place, u8_to_unit, unit_to_u8},
};

/// Turn an 8-bit overlay raster into per-pixel opacity.
///
/// Intensity exactly `1.0` stamps the overlay at full strength: anything above [`EPS`]
/// becomes `1.0`. Any other intensity scales the raster linearly.
pub fn overlay_opacity(raster: &GrayImage, intensity: f64) -> Vec<f64> {
    if intensity == 1.0 {
        raster
            .as_raw()
            .iter()
            .map(|&v| if u8_to_unit(v) > EPS { 1.0 } else { 0.0 })
            .collect()
    } else {
        raster
            .as_raw()
            .iter()
            .map(|&v| u8_to_unit(v) * intensity)
            .collect()
    }
}

/// `dst = dst * (1 - overlay)`, element-wise.
pub fn multiply_in_place(dst: &mut [f64], overlay: &[f64]) -> OverlayResult<()> {
    if dst.len() != overlay.len() {
        return Err(OverlayError::input(format!(
            "overlay has {} pixels but the image has {}",
            overlay.len(),
            dst.len()
        )));
    }
    for (d, o) in dst.iter_mut().zip(overlay) {
        *d *= 1.0 - o;
    }
    Ok(())
}

/// The working image of one augmentation: normalized on ingestion, darkened by each overlay
/// in turn, normalized again and quantized on [`CompositeState::finish`].
#[derive(Clone, Debug, PartialEq)]
pub struct CompositeState {
    width: u32,
    height: u32,
    pixels: Vec<f64>,
}

impl CompositeState {
    /// Convert to `[0, 1]` and min-max normalize.
    pub fn from_gray(img: &GrayImage) -> Self {
        let mut pixels: Vec<f64> = img.as_raw().iter().map(|&v| u8_to_unit(v)).collect();
        minmax_normalize_in_place(&mut pixels);
        Self {
            width: img.width(),
            height: img.height(),
            pixels,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Current working values, row-major.
    pub fn pixels(&self) -> &[f64] {
        &self.pixels
    }

    /// Blend one overlay raster at `intensity` onto the current state.
    pub fn apply_overlay(&mut self, raster: &GrayImage, intensity: f64) -> OverlayResult<()> {
        if raster.dimensions() != (self.width, self.height) {
            return Err(OverlayError::input(format!(
                "overlay is {}x{} but the image is {}x{}",
                raster.width(),
                raster.height(),
                self.width,
                self.height
            )));
        }
        let opacity = overlay_opacity(raster, intensity);
        multiply_in_place(&mut self.pixels, &opacity)
    }

    /// Min-max normalize and convert back to 8 bits.
    pub fn finish(mut self) -> OverlayResult<GrayImage> {
        minmax_normalize_in_place(&mut self.pixels);
        let bytes: Vec<u8> = self.pixels.iter().map(|&v| unit_to_u8(v)).collect();
        GrayImage::from_raw(self.width, self.height, bytes)
            .ok_or_else(|| OverlayError::input("composite buffer size mismatch"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
