use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    effects::distort::AffineParams,
    foundation::error::{OverlayError, OverlayResult},
    sampling::{
        distribution::{AxisPair, ContinuousParam, DiscreteParam},
        sampler::check_upper_bounds,
    },
};

/// Largest accepted target side, matching the working raster limit of the glyph renderer.
pub const MAX_TARGET_SIDE: u32 = 16_384;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Constructor-time configuration of [`crate::OverlayFont`]; fixed for the augmenter's lifetime.
///
/// Deserializes from JSON with every field except `font_dir` optional.
pub struct OverlayFontConfig {
    /// Directory scanned (non-recursively) for font files.
    pub font_dir: PathBuf,
    /// Font file extensions to accept, without the dot.
    #[serde(default = "default_font_extensions")]
    pub font_extensions: Vec<String>,
    /// Output height of every overlay raster; input images must match it.
    #[serde(default = "default_target_side")]
    pub target_height: u32,
    /// Output width of every overlay raster; input images must match it.
    #[serde(default = "default_target_side")]
    pub target_width: u32,
    /// Number of overlays per image.
    #[serde(default = "default_count_range")]
    pub num_samples: DiscreteParam,
    /// Symbols per overlay.
    #[serde(default = "default_count_range")]
    pub length_samples: DiscreteParam,
    /// Per-axis scale applied by the affine step.
    #[serde(default = "default_overlay_scale")]
    pub overlay_scale: AxisPair<ContinuousParam>,
    /// Per-axis shift in pixels applied by the affine step.
    #[serde(default = "default_overlay_shift")]
    pub overlay_shift: AxisPair<DiscreteParam>,
    /// Rotation in degrees applied by the affine step.
    #[serde(default = "default_overlay_rotation")]
    pub overlay_rotation: ContinuousParam,
    /// Blend intensity per overlay, within `[0, 1]`.
    #[serde(default = "default_overlay_intensity")]
    pub overlay_intensity: ContinuousParam,
    /// Worker-pool settings for per-image processing.
    #[serde(default)]
    pub threading: AugmentThreading,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Per-image parallelism. Output is identical with and without it.
pub struct AugmentThreading {
    /// Process images on a dedicated rayon pool.
    #[serde(default)]
    pub parallel: bool,
    /// Worker count override; `None` uses rayon's default.
    #[serde(default)]
    pub threads: Option<usize>,
}

fn default_font_extensions() -> Vec<String> {
    vec!["ttf".to_string(), "otf".to_string()]
}

fn default_target_side() -> u32 {
    256
}

fn default_count_range() -> DiscreteParam {
    DiscreteParam::Uniform(1, 2)
}

fn default_overlay_scale() -> AxisPair<ContinuousParam> {
    AxisPair {
        x: ContinuousParam::Uniform(0.05, 2.0),
        y: ContinuousParam::Uniform(0.05, 2.0),
    }
}

fn default_overlay_shift() -> AxisPair<DiscreteParam> {
    AxisPair {
        x: DiscreteParam::Uniform(-50, 50),
        y: DiscreteParam::Uniform(-50, 50),
    }
}

fn default_overlay_rotation() -> ContinuousParam {
    ContinuousParam::Uniform(0.0, 360.0)
}

fn default_overlay_intensity() -> ContinuousParam {
    ContinuousParam::Uniform(0.5, 0.9)
}

impl OverlayFontConfig {
    /// Defaults for everything except the font directory.
    pub fn new(font_dir: impl Into<PathBuf>) -> Self {
        Self {
            font_dir: font_dir.into(),
            font_extensions: default_font_extensions(),
            target_height: default_target_side(),
            target_width: default_target_side(),
            num_samples: default_count_range(),
            length_samples: default_count_range(),
            overlay_scale: default_overlay_scale(),
            overlay_shift: default_overlay_shift(),
            overlay_rotation: default_overlay_rotation(),
            overlay_intensity: default_overlay_intensity(),
            threading: AugmentThreading::default(),
        }
    }

    /// Load a JSON configuration file.
    pub fn from_json_path(path: &Path) -> OverlayResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_str(&text)
            .map_err(|e| OverlayError::serde(format!("parse '{}': {e}", path.display())))?;
        Ok(cfg)
    }

    /// Reject configurations the augmenter cannot honour.
    pub fn validate(&self) -> OverlayResult<()> {
        if self.target_height == 0 || self.target_width == 0 {
            return Err(OverlayError::configuration(
                "target_height/target_width must be > 0",
            ));
        }
        if self.target_height > MAX_TARGET_SIDE || self.target_width > MAX_TARGET_SIDE {
            return Err(OverlayError::configuration(format!(
                "target_height/target_width must be <= {MAX_TARGET_SIDE}"
            )));
        }
        if self.font_extensions.iter().all(|e| e.trim().is_empty()) {
            return Err(OverlayError::configuration(
                "font_extensions must name at least one extension",
            ));
        }

        self.num_samples.validate("num_samples")?;
        if self.num_samples.lower_bound() < 0 {
            return Err(OverlayError::configuration("num_samples must be >= 0"));
        }
        self.length_samples.validate("length_samples")?;
        if self.length_samples.lower_bound() < 1 {
            return Err(OverlayError::configuration("length_samples must be >= 1"));
        }
        check_upper_bounds(&self.num_samples, &self.length_samples)?;

        for (name, p) in [
            ("overlay_scale.x", &self.overlay_scale.x),
            ("overlay_scale.y", &self.overlay_scale.y),
        ] {
            p.validate(name)?;
            if p.lower_bound() <= 0.0 {
                return Err(OverlayError::configuration(format!("{name} must be > 0")));
            }
        }
        self.overlay_shift.x.validate("overlay_shift.x")?;
        self.overlay_shift.y.validate("overlay_shift.y")?;
        self.overlay_rotation.validate("overlay_rotation")?;

        self.overlay_intensity.validate("overlay_intensity")?;
        if self.overlay_intensity.lower_bound() < 0.0 || self.overlay_intensity.upper_bound() > 1.0
        {
            return Err(OverlayError::configuration(
                "overlay_intensity must lie within [0, 1]",
            ));
        }

        if self.threading.threads == Some(0) {
            return Err(OverlayError::configuration(
                "threading.threads must be >= 1 when set",
            ));
        }
        Ok(())
    }

    /// Affine ranges for the distortion sequence.
    pub fn affine_params(&self) -> AffineParams {
        AffineParams {
            scale: self.overlay_scale.clone(),
            shift: self.overlay_shift.clone(),
            rotation: self.overlay_rotation.clone(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/augment/config.rs"]
mod tests;
