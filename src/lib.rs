//! Overlay-font is a deterministic data augmentation for grayscale images.
//!
//! Each image in a batch receives a random number of short alphanumeric strings, rendered in a
//! randomly chosen font, geometrically distorted, blurred and composited multiplicatively so
//! the symbols read as dark ink on the image.
//!
//! - Build an [`OverlayFontConfig`] (or load one from JSON)
//! - Create an [`OverlayFont`]
//! - Call [`OverlayFont::augment_batch`] with a seeded [`RandomStream`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Augmenter, configuration and payloads.
pub mod augment;
/// Distortion and compositing stages.
pub mod effects;
/// Errors and numeric helpers.
pub mod foundation;
/// Fonts, alphabet and rasterization.
pub mod glyphs;
/// Input preparation.
pub mod prep;
/// Randomness and parameter sampling.
pub mod sampling;

pub use crate::augment::config::{AugmentThreading, OverlayFontConfig};
pub use crate::augment::overlay_font::{NamedParameter, OverlayFont, ParameterRef};
pub use crate::augment::payload::{Heatmap, Keypoint, KeypointsOnImage, Payload};
pub use crate::foundation::error::{OverlayError, OverlayResult};
pub use crate::glyphs::alphabet::SymbolAlphabet;
pub use crate::glyphs::catalog::FontCatalog;
pub use crate::sampling::distribution::{AxisPair, ContinuousParam, DiscreteParam};
pub use crate::sampling::stream::RandomStream;
