//! Per-batch parameter draw.
//!
//! All random parameters for a batch are drawn up front, from one stream, in a fixed order:
//! overlay counts, symbol lengths, font ids, intensities, character ids. Reordering these
//! draws changes the output for a given seed.

use crate::{
    foundation::error::{OverlayError, OverlayResult},
    glyphs::alphabet::SymbolAlphabet,
    sampling::{
        distribution::{ContinuousParam, DiscreteParam, Distribution},
        stream::RandomStream,
    },
};

/// Largest accepted upper bound for the per-image overlay count.
pub const MAX_OVERLAYS_PER_IMAGE: i64 = 256;
/// Largest accepted upper bound for the symbols in one overlay.
pub const MAX_SYMBOLS_PER_OVERLAY: i64 = 256;

/// One overlay to rasterize and composite.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayPlan {
    /// Index into the font catalog.
    pub font_id: usize,
    /// Symbols to render, in order.
    pub symbols: String,
    /// Blend intensity in `[0, 1]`.
    pub intensity: f64,
}

/// Distributions for every per-batch draw.
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterSampler {
    num_overlays: DiscreteParam,
    lengths: DiscreteParam,
    font_id: DiscreteParam,
    intensity: ContinuousParam,
    symbol_id: DiscreteParam,
    max_overlays: usize,
    max_length: usize,
}

impl ParameterSampler {
    /// Build a sampler over `font_count` fonts and `alphabet`.
    ///
    /// Fails when the catalog or alphabet is empty, or when counts or lengths can be negative.
    pub fn new(
        num_overlays: DiscreteParam,
        lengths: DiscreteParam,
        intensity: ContinuousParam,
        font_count: usize,
        alphabet: &SymbolAlphabet,
    ) -> OverlayResult<Self> {
        if font_count == 0 {
            return Err(OverlayError::configuration("font catalog must be non-empty"));
        }
        if alphabet.is_empty() {
            return Err(OverlayError::configuration("symbol alphabet must be non-empty"));
        }
        num_overlays.validate("num_samples")?;
        lengths.validate("length_samples")?;
        intensity.validate("overlay_intensity")?;
        if num_overlays.lower_bound() < 0 {
            return Err(OverlayError::configuration("num_samples must be >= 0"));
        }
        if lengths.lower_bound() < 1 {
            return Err(OverlayError::configuration("length_samples must be >= 1"));
        }
        check_upper_bounds(&num_overlays, &lengths)?;

        let max_overlays = num_overlays.upper_bound() as usize;
        let max_length = lengths.upper_bound() as usize;
        Ok(Self {
            num_overlays,
            lengths,
            font_id: DiscreteParam::Uniform(0, font_count as i64 - 1),
            intensity,
            symbol_id: DiscreteParam::Uniform(0, alphabet.len() as i64 - 1),
            max_overlays,
            max_length,
        })
    }

    /// Font-id distribution, uniform over the catalog.
    pub fn font_id(&self) -> &DiscreteParam {
        &self.font_id
    }

    /// Symbol-id distribution, uniform over the alphabet.
    pub fn symbol_id(&self) -> &DiscreteParam {
        &self.symbol_id
    }

    /// Intensity distribution.
    pub fn intensity(&self) -> &ContinuousParam {
        &self.intensity
    }

    /// Overlay slots per image (`M`).
    pub fn max_overlays(&self) -> usize {
        self.max_overlays
    }

    /// Symbol slots per overlay (`L`).
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Draw every parameter for a batch of `batch` images.
    ///
    /// Fails with an input error when the batch is too large to index its overlay slots.
    pub fn draw(
        &self,
        batch: usize,
        stream: &mut RandomStream,
    ) -> OverlayResult<BatchParameters> {
        let m = self.max_overlays;
        let l = self.max_length;
        let overlay_slots = batch.checked_mul(m);
        let char_slots = overlay_slots.and_then(|n| n.checked_mul(l));
        let (Some(overlay_slots), Some(char_slots)) = (overlay_slots, char_slots) else {
            return Err(OverlayError::input(format!(
                "batch of {batch} with {m} overlays of {l} symbols overflows the slot count"
            )));
        };

        let num_overlays = to_indices(self.num_overlays.sample(batch, stream));
        let lengths = to_indices(self.lengths.sample(overlay_slots, stream));
        let font_ids = to_indices(self.font_id.sample(overlay_slots, stream));
        let intensities = self.intensity.sample(overlay_slots, stream);
        let char_ids = to_indices(self.symbol_id.sample(char_slots, stream));

        Ok(BatchParameters {
            batch,
            max_overlays: m,
            max_length: l,
            num_overlays,
            lengths,
            font_ids,
            intensities,
            char_ids,
        })
    }
}

/// Reject overlay-count or symbol-length ranges above [`MAX_OVERLAYS_PER_IMAGE`] and
/// [`MAX_SYMBOLS_PER_OVERLAY`].
pub fn check_upper_bounds(
    num_overlays: &DiscreteParam,
    lengths: &DiscreteParam,
) -> OverlayResult<()> {
    if num_overlays.upper_bound() > MAX_OVERLAYS_PER_IMAGE {
        return Err(OverlayError::configuration(format!(
            "num_samples must be <= {MAX_OVERLAYS_PER_IMAGE}"
        )));
    }
    if lengths.upper_bound() > MAX_SYMBOLS_PER_OVERLAY {
        return Err(OverlayError::configuration(format!(
            "length_samples must be <= {MAX_SYMBOLS_PER_OVERLAY}"
        )));
    }
    Ok(())
}

fn to_indices(values: Vec<i64>) -> Vec<usize> {
    values.into_iter().map(|v| v.max(0) as usize).collect()
}

/// Parameters for a whole batch, stored as flat `[N]`, `[N][M]` and `[N][M][L]` arrays.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchParameters {
    batch: usize,
    max_overlays: usize,
    max_length: usize,
    num_overlays: Vec<usize>,
    lengths: Vec<usize>,
    font_ids: Vec<usize>,
    intensities: Vec<f64>,
    char_ids: Vec<usize>,
}

impl BatchParameters {
    /// Number of images (`N`).
    pub fn batch_len(&self) -> usize {
        self.batch
    }

    /// Overlay slots per image (`M`).
    pub fn max_overlays(&self) -> usize {
        self.max_overlays
    }

    /// Symbol slots per overlay (`L`).
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Overlay count for image `i`.
    pub fn num_overlays(&self, i: usize) -> usize {
        self.num_overlays[i]
    }

    /// Symbol length for image `i`, slot `j`.
    pub fn length(&self, i: usize, j: usize) -> usize {
        self.lengths[i * self.max_overlays + j]
    }

    /// Font id for image `i`, slot `j`.
    pub fn font_id(&self, i: usize, j: usize) -> usize {
        self.font_ids[i * self.max_overlays + j]
    }

    /// Intensity for image `i`, slot `j`.
    pub fn intensity(&self, i: usize, j: usize) -> f64 {
        self.intensities[i * self.max_overlays + j]
    }

    /// Character id for image `i`, slot `j`, position `s`.
    pub fn char_id(&self, i: usize, j: usize, s: usize) -> usize {
        self.char_ids[(i * self.max_overlays + j) * self.max_length + s]
    }

    /// Overlays for image `i`, in compositing order.
    pub fn overlay_plans(
        &self,
        i: usize,
        alphabet: &SymbolAlphabet,
    ) -> OverlayResult<Vec<OverlayPlan>> {
        (0..self.num_overlays(i))
            .map(|j| {
                let ids: Vec<usize> = (0..self.length(i, j))
                    .map(|s| self.char_id(i, j, s))
                    .collect();
                let symbols = alphabet.spell(&ids).ok_or_else(|| {
                    OverlayError::configuration(format!(
                        "character id out of range for image {i}, overlay {j}"
                    ))
                })?;
                Ok(OverlayPlan {
                    font_id: self.font_id(i, j),
                    symbols,
                    intensity: self.intensity(i, j),
                })
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sampling/sampler.rs"]
mod tests;
