use image::{Luma, Rgb, RgbImage};

use super::*;

#[test]
fn ingest_accepts_gray_and_rejects_color() {
    let gray = DynamicImage::ImageLuma8(GrayImage::from_pixel(3, 2, Luma([9])));
    assert_eq!(ingest_image(&gray).unwrap().dimensions(), (3, 2));

    let wide = DynamicImage::ImageLuma16(image::ImageBuffer::from_pixel(2, 2, Luma([65535u16])));
    assert_eq!(ingest_image(&wide).unwrap().get_pixel(0, 0)[0], 255);

    let rgb = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb([1, 2, 3])));
    assert!(matches!(ingest_image(&rgb), Err(OverlayError::Input(_))));
}

#[test]
fn ingest_rejects_empty_extent() {
    let empty = DynamicImage::ImageLuma8(GrayImage::new(0, 4));
    assert!(matches!(ingest_image(&empty), Err(OverlayError::Input(_))));
}

#[test]
fn fit_within_keeps_aspect_ratio() {
    assert_eq!(fit_within((100, 50), (256, 256)), (256, 128));
    assert_eq!(fit_within((50, 100), (256, 256)), (128, 256));
    assert_eq!(fit_within((300, 300), (128, 256)), (128, 128));
}

#[test]
fn resize_then_pad_reaches_target() {
    let img = GrayImage::from_pixel(40, 20, Luma([200]));
    let resized = resize_to_shape(&img, 64, 64).unwrap();
    assert_eq!(resized.dimensions(), (64, 32));

    let padded = pad_to_fixed_size(&resized, 64, 64).unwrap();
    assert_eq!(padded.dimensions(), (64, 64));
    assert_eq!(padded.get_pixel(32, 0)[0], 0);
    assert_eq!(padded.get_pixel(32, 32)[0], 200);
}

#[test]
fn pad_rejects_oversized_input() {
    let img = GrayImage::new(10, 10);
    assert!(pad_to_fixed_size(&img, 5, 20).is_err());
}
