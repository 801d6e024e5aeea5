use image::GrayImage;

use crate::foundation::error::{OverlayError, OverlayResult};

/// Kernel radius used for a given sigma: the Gaussian is truncated at four standard deviations.
pub fn radius_for_sigma(sigma: f32) -> u32 {
    (4.0 * sigma).ceil().max(0.0) as u32
}

/// Separable Gaussian blur of a single-channel image with clamped edges.
///
/// The kernel is quantized to Q16 fixed point, so results are bit-exact on every platform.
pub fn gaussian_blur_gray(src: &GrayImage, sigma: f32) -> OverlayResult<GrayImage> {
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(OverlayError::configuration("blur sigma must be finite and >= 0"));
    }
    let (width, height) = src.dimensions();
    let radius = radius_for_sigma(sigma);
    if radius == 0 || width == 0 || height == 0 {
        return Ok(src.clone());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; src.as_raw().len()];
    let mut out = vec![0u8; src.as_raw().len()];

    horizontal_pass(src.as_raw(), &mut tmp, width, height, &kernel);
    vertical_pass(&tmp, &mut out, width, height, &kernel);
    GrayImage::from_raw(width, height, out)
        .ok_or_else(|| OverlayError::rendering("blur output size mismatch"))
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> OverlayResult<Vec<u32>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(OverlayError::configuration("blur sigma must be > 0"));
    }

    const ONE: i64 = 1 << 16;
    let two_var = 2.0 * f64::from(sigma).powi(2);
    let r = radius as i64;
    let raw: Vec<f64> = (-r..=r)
        .map(|i| (-((i * i) as f64) / two_var).exp())
        .collect();
    let total: f64 = raw.iter().sum();

    let mut q: Vec<i64> = raw
        .iter()
        .map(|w| ((w / total) * ONE as f64).round() as i64)
        .collect();
    // Fold the rounding residue into the center tap so the kernel sums to exactly 1.0.
    let residue = ONE - q.iter().sum::<i64>();
    q[radius as usize] = (q[radius as usize] + residue).clamp(0, ONE);

    Ok(q.into_iter().map(|w| w as u32).collect())
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    for y in 0..height as i32 {
        for x in 0..w {
            let mut acc = 0u64;
            for (ki, &kw) in k.iter().enumerate() {
                let sx = (x + ki as i32 - radius).clamp(0, w - 1);
                acc += u64::from(kw) * u64::from(src[(y * w + sx) as usize]);
            }
            dst[(y * w + x) as usize] = q16_to_u8(acc);
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0u64;
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y + ki as i32 - radius).clamp(0, h - 1);
                acc += u64::from(kw) * u64::from(src[(sy * w + x) as usize]);
            }
            dst[(y * w + x) as usize] = q16_to_u8(acc);
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    ((acc + 32768) >> 16).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
