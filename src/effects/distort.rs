//! Fixed perturbation sequence applied to each rasterized overlay.
//!
//! Order is part of the output contract: local warp, row occlusion, affine, blur. Every random
//! draw comes from the stream passed to [`OverlayDistortion::apply`], in step order.

use image::{GrayImage, Luma};
use imageproc::geometric_transformations::{Interpolation, Projection, warp};
use kurbo::{Affine, Vec2};

use crate::{
    effects::{
        blur::gaussian_blur_gray,
        warp::{DisplacementGrid, local_warp},
    },
    foundation::error::{OverlayError, OverlayResult},
    sampling::{
        distribution::{AxisPair, ContinuousParam, DiscreteParam, Distribution},
        stream::RandomStream,
    },
};

/// Probability of the local warp step.
pub const LOCAL_WARP_PROBABILITY: f64 = 0.5;
/// Local warp magnitude range, as a fraction of the canvas extent.
pub const LOCAL_WARP_MAGNITUDE: (f64, f64) = (0.01, 0.05);
/// Probability of the row occlusion step.
pub const ROW_OCCLUSION_PROBABILITY: f64 = 0.1;
/// Every `ROW_OCCLUSION_STRIDE`-th row is zeroed, starting at row 0.
pub const ROW_OCCLUSION_STRIDE: u32 = 4;
/// Standard deviation of the final blur, in pixels.
pub const BLUR_SIGMA: f32 = 1.0;

/// Random ranges for the affine step.
#[derive(Clone, Debug, PartialEq)]
pub struct AffineParams {
    /// Per-axis scale factor.
    pub scale: AxisPair<ContinuousParam>,
    /// Per-axis translation in whole pixels.
    pub shift: AxisPair<DiscreteParam>,
    /// Rotation in degrees.
    pub rotation: ContinuousParam,
}

/// One drawn affine transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffineDraw {
    /// Horizontal scale.
    pub scale_x: f64,
    /// Vertical scale.
    pub scale_y: f64,
    /// Horizontal shift in pixels.
    pub shift_x: i64,
    /// Vertical shift in pixels.
    pub shift_y: i64,
    /// Rotation in degrees.
    pub rotation_deg: f64,
}

impl AffineParams {
    /// Draw scale x, scale y, shift x, shift y, rotation, in that order.
    pub fn draw(&self, stream: &mut RandomStream) -> AffineDraw {
        AffineDraw {
            scale_x: self.scale.x.sample_one(stream),
            scale_y: self.scale.y.sample_one(stream),
            shift_x: self.shift.x.sample_one(stream),
            shift_y: self.shift.y.sample_one(stream),
            rotation_deg: self.rotation.sample_one(stream),
        }
    }
}

impl AffineDraw {
    /// Forward transform for a `width x height` canvas, pivoting on its center.
    pub fn to_affine(&self, width: u32, height: u32) -> Affine {
        let center = Vec2::new(
            (f64::from(width) - 1.0) / 2.0,
            (f64::from(height) - 1.0) / 2.0,
        );
        Affine::translate(center + Vec2::new(self.shift_x as f64, self.shift_y as f64))
            * Affine::rotate(self.rotation_deg.to_radians())
            * Affine::scale_non_uniform(self.scale_x, self.scale_y)
            * Affine::translate(-center)
    }
}

/// A step of the overlay distortion sequence.
#[derive(Clone, Debug, PartialEq)]
pub enum DistortStep {
    /// Non-rigid warp on a jittered control grid.
    LocalWarp {
        /// Chance the step runs.
        probability: f64,
        /// Jitter magnitude as a fraction of the canvas extent.
        magnitude: ContinuousParam,
    },
    /// Zero every `stride`-th row.
    RowOcclusion {
        /// Chance the step runs.
        probability: f64,
        /// Row period.
        stride: u32,
    },
    /// Scale, shift and rotate with nearest-neighbour resampling.
    Affine(AffineParams),
    /// Isotropic Gaussian blur.
    GaussianBlur {
        /// Standard deviation in pixels.
        sigma: f32,
    },
}

/// The ordered distortion sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayDistortion {
    steps: Vec<DistortStep>,
}

impl OverlayDistortion {
    /// Build the standard sequence around the configured affine ranges.
    pub fn new(affine: AffineParams) -> Self {
        Self {
            steps: vec![
                DistortStep::LocalWarp {
                    probability: LOCAL_WARP_PROBABILITY,
                    magnitude: ContinuousParam::Uniform(
                        LOCAL_WARP_MAGNITUDE.0,
                        LOCAL_WARP_MAGNITUDE.1,
                    ),
                },
                DistortStep::RowOcclusion {
                    probability: ROW_OCCLUSION_PROBABILITY,
                    stride: ROW_OCCLUSION_STRIDE,
                },
                DistortStep::Affine(affine),
                DistortStep::GaussianBlur { sigma: BLUR_SIGMA },
            ],
        }
    }

    /// Steps in execution order.
    pub fn steps(&self) -> &[DistortStep] {
        &self.steps
    }

    /// Run every step over `raster`, drawing from `stream`.
    pub fn apply(&self, raster: &GrayImage, stream: &mut RandomStream) -> OverlayResult<GrayImage> {
        let mut img = raster.clone();
        for step in &self.steps {
            img = apply_step(step, img, stream)?;
        }
        Ok(img)
    }
}

fn apply_step(
    step: &DistortStep,
    img: GrayImage,
    stream: &mut RandomStream,
) -> OverlayResult<GrayImage> {
    match step {
        DistortStep::LocalWarp {
            probability,
            magnitude,
        } => {
            if !stream.coin(*probability) {
                return Ok(img);
            }
            let m = magnitude.sample_one(stream);
            let grid = DisplacementGrid::sample(m, img.width(), img.height(), stream);
            tracing::debug!(magnitude = m, "local warp");
            Ok(local_warp(&img, &grid))
        }
        DistortStep::RowOcclusion {
            probability,
            stride,
        } => {
            if !stream.coin(*probability) {
                return Ok(img);
            }
            tracing::debug!(stride, "row occlusion");
            let mut img = img;
            occlude_rows(&mut img, *stride);
            Ok(img)
        }
        DistortStep::Affine(params) => {
            let draw = params.draw(stream);
            tracing::debug!(?draw, "affine");
            affine_nearest(&img, draw.to_affine(img.width(), img.height()))
        }
        DistortStep::GaussianBlur { sigma } => gaussian_blur_gray(&img, *sigma),
    }
}

/// Set rows `0, stride, 2 * stride, ...` to zero.
pub fn occlude_rows(img: &mut GrayImage, stride: u32) {
    if stride == 0 {
        return;
    }
    let width = img.width();
    for y in (0..img.height()).step_by(stride as usize) {
        for x in 0..width {
            img.put_pixel(x, y, Luma([0]));
        }
    }
}

/// Apply the forward transform `affine` with nearest-neighbour sampling; uncovered pixels are 0.
pub fn affine_nearest(src: &GrayImage, affine: Affine) -> OverlayResult<GrayImage> {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    let projection = Projection::from_matrix([
        a as f32, c as f32, e as f32, b as f32, d as f32, f as f32, 0.0, 0.0, 1.0,
    ])
    .ok_or_else(|| OverlayError::rendering("overlay affine transform is not invertible"))?;
    Ok(warp(src, &projection, Interpolation::Nearest, Luma([0])))
}

#[cfg(test)]
#[path = "../../tests/unit/effects/distort.rs"]
mod tests;
