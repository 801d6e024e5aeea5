//! Small non-rigid warp driven by a jittered control grid.

use image::{GrayImage, Luma};
use imageproc::geometric_transformations::{Interpolation, warp_with};

use crate::sampling::stream::RandomStream;

/// Control points per column.
pub const GRID_ROWS: usize = 4;
/// Control points per row.
pub const GRID_COLS: usize = 4;

/// Per-control-point displacement, in pixels, for a `GRID_ROWS x GRID_COLS` grid spanning the
/// whole image (corners included).
#[derive(Clone, Debug, PartialEq)]
pub struct DisplacementGrid {
    dx: Vec<f32>,
    dy: Vec<f32>,
    width: u32,
    height: u32,
}

impl DisplacementGrid {
    /// Jitter each control point by `normal(0, magnitude)` of the image extent, row-major,
    /// x before y.
    pub fn sample(magnitude: f64, width: u32, height: u32, stream: &mut RandomStream) -> Self {
        let n = GRID_ROWS * GRID_COLS;
        let mut dx = Vec::with_capacity(n);
        let mut dy = Vec::with_capacity(n);
        for _ in 0..n {
            dx.push((stream.normal(0.0, magnitude) * f64::from(width)) as f32);
            dy.push((stream.normal(0.0, magnitude) * f64::from(height)) as f32);
        }
        Self {
            dx,
            dy,
            width,
            height,
        }
    }

    /// A grid with no displacement.
    pub fn zero(width: u32, height: u32) -> Self {
        let n = GRID_ROWS * GRID_COLS;
        Self {
            dx: vec![0.0; n],
            dy: vec![0.0; n],
            width,
            height,
        }
    }

    /// Bilinearly interpolated displacement at pixel `(x, y)`.
    pub fn displacement_at(&self, x: f32, y: f32) -> (f32, f32) {
        let gx = grid_coord(x, self.width, GRID_COLS);
        let gy = grid_coord(y, self.height, GRID_ROWS);
        let c0 = (gx.floor() as usize).min(GRID_COLS - 2);
        let r0 = (gy.floor() as usize).min(GRID_ROWS - 2);
        let tx = gx - c0 as f32;
        let ty = gy - r0 as f32;

        let lerp2 = |v: &[f32]| {
            let at = |r: usize, c: usize| v[r * GRID_COLS + c];
            let top = at(r0, c0) * (1.0 - tx) + at(r0, c0 + 1) * tx;
            let bottom = at(r0 + 1, c0) * (1.0 - tx) + at(r0 + 1, c0 + 1) * tx;
            top * (1.0 - ty) + bottom * ty
        };
        (lerp2(&self.dx), lerp2(&self.dy))
    }
}

fn grid_coord(p: f32, extent: u32, points: usize) -> f32 {
    if extent <= 1 {
        return 0.0;
    }
    let t = (p / (extent - 1) as f32).clamp(0.0, 1.0);
    t * (points - 1) as f32
}

/// Resample `src` through the displacement field (bilinear, zero outside).
pub fn local_warp(src: &GrayImage, grid: &DisplacementGrid) -> GrayImage {
    warp_with(
        src,
        |x, y| {
            let (dx, dy) = grid.displacement_at(x, y);
            (x + dx, y + dy)
        },
        Interpolation::Bilinear,
        Luma([0]),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/effects/warp.rs"]
mod tests;
