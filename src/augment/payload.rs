use image::GrayImage;

/// Per-pixel float map riding along with an image (segmentation/attention targets).
#[derive(Clone, Debug, PartialEq)]
pub struct Heatmap {
    /// Width in cells.
    pub width: u32,
    /// Height in cells.
    pub height: u32,
    /// Row-major values.
    pub values: Vec<f32>,
}

/// A single 2D point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keypoint {
    /// Horizontal position in pixels.
    pub x: f32,
    /// Vertical position in pixels.
    pub y: f32,
}

/// Keypoints belonging to one image of the given size.
#[derive(Clone, Debug, PartialEq)]
pub struct KeypointsOnImage {
    /// Image width the points refer to.
    pub width: u32,
    /// Image height the points refer to.
    pub height: u32,
    /// The points.
    pub points: Vec<Keypoint>,
}

/// Data handed to an augmenter by the surrounding pipeline.
///
/// Overlays only affect pixels; heatmaps and keypoints pass through unchanged.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    /// Single-channel image to augment.
    Image(GrayImage),
    /// Heatmap, returned as-is.
    Heatmap(Heatmap),
    /// Keypoints, returned as-is.
    Keypoints(KeypointsOnImage),
}

impl Payload {
    /// Short name of the variant, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Image(_) => "image",
            Self::Heatmap(_) => "heatmap",
            Self::Keypoints(_) => "keypoints",
        }
    }
}
