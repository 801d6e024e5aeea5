use image::GrayImage;
use rayon::prelude::*;

use crate::{
    augment::{config::OverlayFontConfig, payload::Payload},
    effects::{composite::CompositeState, distort::OverlayDistortion},
    foundation::error::{OverlayError, OverlayResult},
    glyphs::{alphabet::SymbolAlphabet, catalog::FontCatalog, raster::GlyphRasterizer},
    sampling::{
        distribution::{ContinuousParam, DiscreteParam},
        sampler::{OverlayPlan, ParameterSampler},
        stream::RandomStream,
    },
};

/// Borrowed view of one of the augmenter's distributions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParameterRef<'a> {
    /// Integer-valued distribution.
    Discrete(&'a DiscreteParam),
    /// Real-valued distribution.
    Continuous(&'a ContinuousParam),
}

/// A distribution together with its public name.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NamedParameter<'a> {
    /// Stable parameter name.
    pub name: &'static str,
    /// The distribution.
    pub param: ParameterRef<'a>,
}

/// Imprints randomly drawn symbol strings onto batches of grayscale images.
///
/// For a batch, every random parameter is drawn first (see
/// [`ParameterSampler::draw`]), then one substream per image is split off the same stream.
/// Each image is then rendered independently: rasterize, distort and composite each of its
/// overlays in order, then renormalize. A fixed seed reproduces the batch bit for bit,
/// with or without the worker pool.
#[derive(Debug)]
pub struct OverlayFont {
    config: OverlayFontConfig,
    catalog: FontCatalog,
    alphabet: SymbolAlphabet,
    sampler: ParameterSampler,
    distortion: OverlayDistortion,
}

struct ImageJob {
    index: usize,
    plans: Vec<OverlayPlan>,
    stream: RandomStream,
}

impl OverlayFont {
    /// Validate `config` and discover its font catalog.
    pub fn new(config: OverlayFontConfig) -> OverlayResult<Self> {
        config.validate()?;
        let catalog = FontCatalog::discover(&config.font_dir, &config.font_extensions)?;
        Self::with_catalog(config, catalog)
    }

    /// Build from an explicit catalog; `config.font_dir` is not scanned.
    pub fn with_catalog(config: OverlayFontConfig, catalog: FontCatalog) -> OverlayResult<Self> {
        config.validate()?;
        let alphabet = SymbolAlphabet::ascii_alphanumeric();
        let sampler = ParameterSampler::new(
            config.num_samples.clone(),
            config.length_samples.clone(),
            config.overlay_intensity.clone(),
            catalog.len(),
            &alphabet,
        )?;
        let distortion = OverlayDistortion::new(config.affine_params());
        Ok(Self {
            config,
            catalog,
            alphabet,
            sampler,
            distortion,
        })
    }

    /// Configuration in effect.
    pub fn config(&self) -> &OverlayFontConfig {
        &self.config
    }

    /// Fonts available to overlays.
    pub fn catalog(&self) -> &FontCatalog {
        &self.catalog
    }

    /// The per-batch parameter sampler.
    pub fn sampler(&self) -> &ParameterSampler {
        &self.sampler
    }

    /// The font-id, symbol-id and overlay-intensity distributions.
    pub fn parameters(&self) -> Vec<NamedParameter<'_>> {
        vec![
            NamedParameter {
                name: "font_id",
                param: ParameterRef::Discrete(self.sampler.font_id()),
            },
            NamedParameter {
                name: "symbol_id",
                param: ParameterRef::Discrete(self.sampler.symbol_id()),
            },
            NamedParameter {
                name: "overlay_intensity",
                param: ParameterRef::Continuous(self.sampler.intensity()),
            },
        ]
    }

    /// Augment a batch of images, preserving order and count.
    ///
    /// Every image must have the configured target dimensions. The first failing image
    /// aborts the batch.
    #[tracing::instrument(skip_all, fields(batch = images.len()))]
    pub fn augment_batch(
        &self,
        images: &[GrayImage],
        stream: &mut RandomStream,
    ) -> OverlayResult<Vec<GrayImage>> {
        self.validate_inputs(images)?;

        let params = self.sampler.draw(images.len(), stream)?;
        let substreams = stream.split(images.len());
        let mut jobs = Vec::with_capacity(images.len());
        for (index, sub) in substreams.into_iter().enumerate() {
            jobs.push(ImageJob {
                index,
                plans: params.overlay_plans(index, &self.alphabet)?,
                stream: sub,
            });
        }

        if !self.config.threading.parallel {
            let mut rasterizer = GlyphRasterizer::new(&self.catalog);
            return jobs
                .into_iter()
                .map(|job| self.augment_one(&mut rasterizer, &images[job.index], job))
                .collect();
        }

        let pool = build_thread_pool(self.config.threading.threads)?;
        let results = pool.install(|| {
            jobs.into_par_iter()
                .map_init(
                    || GlyphRasterizer::new(&self.catalog),
                    |rasterizer, job| self.augment_one(rasterizer, &images[job.index], job),
                )
                .collect::<Vec<_>>()
        });
        results.into_iter().collect()
    }

    /// Augment a single image; equivalent to a batch of one.
    pub fn augment_image(
        &self,
        image: &GrayImage,
        stream: &mut RandomStream,
    ) -> OverlayResult<GrayImage> {
        let mut out = self.augment_batch(std::slice::from_ref(image), stream)?;
        out.pop()
            .ok_or_else(|| OverlayError::input("augment_image produced no output"))
    }

    /// Augment every image payload as one batch; heatmaps and keypoints pass through
    /// unchanged and keep their positions.
    pub fn augment_payloads(
        &self,
        payloads: Vec<Payload>,
        stream: &mut RandomStream,
    ) -> OverlayResult<Vec<Payload>> {
        let mut slots = Vec::with_capacity(payloads.len());
        let mut images = Vec::new();
        for payload in payloads {
            match payload {
                Payload::Image(img) => {
                    slots.push(None);
                    images.push(img);
                }
                other => {
                    tracing::debug!(kind = other.kind(), "passing payload through");
                    slots.push(Some(other));
                }
            }
        }

        let mut augmented = self.augment_batch(&images, stream)?.into_iter();
        slots
            .into_iter()
            .map(|slot| match slot {
                Some(passthrough) => Ok(passthrough),
                None => augmented
                    .next()
                    .map(Payload::Image)
                    .ok_or_else(|| OverlayError::input("augmented batch is shorter than input")),
            })
            .collect()
    }

    fn validate_inputs(&self, images: &[GrayImage]) -> OverlayResult<()> {
        let target = (self.config.target_width, self.config.target_height);
        for (i, img) in images.iter().enumerate() {
            if img.width() == 0 || img.height() == 0 {
                return Err(OverlayError::input(format!(
                    "image {i} has a degenerate extent {}x{}",
                    img.width(),
                    img.height()
                )));
            }
            if img.dimensions() != target {
                return Err(OverlayError::input(format!(
                    "image {i} is {}x{} but the target is {}x{}",
                    img.width(),
                    img.height(),
                    target.0,
                    target.1
                )));
            }
        }
        Ok(())
    }

    #[tracing::instrument(skip_all, fields(image = job.index, overlays = job.plans.len()))]
    fn augment_one(
        &self,
        rasterizer: &mut GlyphRasterizer<'_>,
        image: &GrayImage,
        job: ImageJob,
    ) -> OverlayResult<GrayImage> {
        let ImageJob {
            index,
            plans,
            mut stream,
        } = job;
        let mut state = CompositeState::from_gray(image);
        for (j, plan) in plans.iter().enumerate() {
            let raster = rasterizer.rasterize(
                plan.font_id,
                &plan.symbols,
                self.config.target_width,
                self.config.target_height,
            )?;
            let distorted = self.distortion.apply(&raster, &mut stream)?;
            tracing::debug!(
                image = index,
                overlay = j,
                font_id = plan.font_id,
                symbols = %plan.symbols,
                intensity = plan.intensity,
                "composite overlay"
            );
            state.apply_overlay(&distorted, plan.intensity)?;
        }
        state.finish()
    }
}

fn build_thread_pool(threads: Option<usize>) -> OverlayResult<rayon::ThreadPool> {
    if threads == Some(0) {
        return Err(OverlayError::configuration(
            "threading.threads must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| OverlayError::configuration(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/augment/overlay_font.rs"]
mod tests;
