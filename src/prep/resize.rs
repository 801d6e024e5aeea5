//! Input ingestion and the resize/pad steps that bring arbitrary images to the target canvas.

use image::{ColorType, DynamicImage, GrayImage, imageops::FilterType};

use crate::foundation::error::{OverlayError, OverlayResult};

/// Accept a single-channel image in the working 8-bit representation.
///
/// 16-bit grayscale is narrowed to 8 bits; anything with more than one channel or a zero
/// extent is rejected.
pub fn ingest_image(img: &DynamicImage) -> OverlayResult<GrayImage> {
    if img.width() == 0 || img.height() == 0 {
        return Err(OverlayError::input(format!(
            "image has a degenerate extent {}x{}",
            img.width(),
            img.height()
        )));
    }
    match img.color() {
        ColorType::L8 | ColorType::L16 => Ok(img.to_luma8()),
        other => Err(OverlayError::input(format!(
            "expected a single-channel image, got {other:?}"
        ))),
    }
}

/// Dimensions `(height, width)` that fit `image_hw` inside `target_hw` while keeping the
/// aspect ratio; the relatively larger axis lands exactly on its target.
pub fn fit_within(image_hw: (u32, u32), target_hw: (u32, u32)) -> (u32, u32) {
    let (h, w) = (f64::from(image_hw.0), f64::from(image_hw.1));
    let (th, tw) = target_hw;
    let ratio = h / w;
    if (f64::from(th) / f64::from(tw)) / ratio < 1.0 {
        let new_w = (f64::from(th) / ratio).round().max(1.0) as u32;
        (th, new_w.min(tw))
    } else {
        let new_h = (f64::from(tw) * ratio).round().max(1.0) as u32;
        (new_h.min(th), tw)
    }
}

/// Resize so the image fits inside `height x width` with its aspect ratio preserved.
pub fn resize_to_shape(img: &GrayImage, height: u32, width: u32) -> OverlayResult<GrayImage> {
    if img.width() == 0 || img.height() == 0 || height == 0 || width == 0 {
        return Err(OverlayError::input("resize_to_shape needs non-zero extents"));
    }
    let (h, w) = fit_within((img.height(), img.width()), (height, width));
    Ok(image::imageops::resize(img, w, h, FilterType::CatmullRom))
}

/// Centre `img` on a zero canvas of `height x width`. The image must already fit.
pub fn pad_to_fixed_size(img: &GrayImage, height: u32, width: u32) -> OverlayResult<GrayImage> {
    if img.width() > width || img.height() > height {
        return Err(OverlayError::input(format!(
            "image {}x{} does not fit in {}x{}",
            img.width(),
            img.height(),
            width,
            height
        )));
    }
    let mut canvas = GrayImage::new(width, height);
    let x = (width - img.width()) / 2;
    let y = (height - img.height()) / 2;
    image::imageops::replace(&mut canvas, img, i64::from(x), i64::from(y));
    Ok(canvas)
}

#[cfg(test)]
#[path = "../../tests/unit/prep/resize.rs"]
mod tests;
