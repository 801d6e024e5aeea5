//! Symbol-string rasterization onto a padded square canvas.
//!
//! Layout and shaping go through Parley; glyph outlines are filled with `vello_cpu`. The
//! string is measured at [`NOMINAL_FONT_SIZE`] so the box geometry does not depend on the
//! output resolution, then drawn straight into a working square and bilinearly resized to the
//! requested output size.

use std::collections::HashMap;

use anyhow::Context;
use image::{GrayImage, imageops::FilterType};

use crate::{
    foundation::error::{OverlayError, OverlayResult},
    glyphs::catalog::FontCatalog,
};

/// Font size used for measurement and layout.
pub const NOMINAL_FONT_SIZE: f32 = 2048.0;

/// Extra height added to the measured box to cover descenders and accents.
pub const DESCENDER_PADDING: f64 = 0.21;

const WORKING_OVERSAMPLE: u32 = 2;

/// Brush carried through Parley layouts. Overlays are single-ink, so it carries no data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InkBrush;

/// Geometry of one rendered string in nominal (font-size 2048) pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphBox {
    /// Measured text width.
    pub text_w: u32,
    /// Measured text height after descender padding.
    pub text_h: u32,
    /// Drawing canvas width (twice the text box).
    pub canvas_w: u32,
    /// Drawing canvas height (twice the text box).
    pub canvas_h: u32,
    /// Side of the square the canvas is centred in.
    pub side: u32,
}

impl GlyphBox {
    /// Derive the canvas geometry from a measured layout size.
    pub fn measure(width: f32, height: f32) -> OverlayResult<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(OverlayError::rendering(format!(
                "text measured to an empty box ({width}x{height})"
            )));
        }
        let text_w = width.ceil() as u32;
        let raw_h = height.ceil() as u32;
        let text_h = raw_h + (f64::from(raw_h) * DESCENDER_PADDING) as u32;
        let canvas_w = text_w * 2;
        let canvas_h = text_h * 2;
        Ok(Self {
            text_w,
            text_h,
            canvas_w,
            canvas_h,
            side: canvas_w.max(canvas_h),
        })
    }

    /// Top-left of the text inside the padded square.
    pub fn text_origin(&self) -> (f64, f64) {
        let pad_x = (self.side - self.canvas_w) / 2;
        let pad_y = (self.side - self.canvas_h) / 2;
        (
            f64::from(pad_x) + f64::from(self.canvas_w - self.text_w) / 2.0,
            f64::from(pad_y) + f64::from(self.canvas_h - self.text_h) / 2.0,
        )
    }
}

/// One catalog font with a private Parley context, so family resolution can only ever
/// reach this font.
struct FontSlot {
    font_ctx: parley::FontContext,
    family: String,
    bytes: parley::fontique::Blob<u8>,
    charmap: parley::fontique::CharmapIndex,
}

impl FontSlot {
    fn load(catalog: &FontCatalog, font_id: usize) -> OverlayResult<Self> {
        let path = catalog.path(font_id).ok_or_else(|| {
            OverlayError::rendering(format!(
                "font id {font_id} out of range for catalog of {}",
                catalog.len()
            ))
        })?;
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font '{}'", path.display()))
            .map_err(|e| OverlayError::rendering(format!("{e:#}")))?;
        let bytes = parley::fontique::Blob::from(bytes);

        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx.collection.register_fonts(bytes.clone(), None);
        let (family_id, faces) = families.first().ok_or_else(|| {
            OverlayError::rendering(format!(
                "no font families registered from '{}'",
                path.display()
            ))
        })?;
        let charmap = faces
            .first()
            .map(|face| face.charmap_index())
            .ok_or_else(|| {
                OverlayError::rendering(format!("no font faces in '{}'", path.display()))
            })?;
        let family = font_ctx
            .collection
            .family_name(*family_id)
            .ok_or_else(|| OverlayError::rendering("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            family,
            bytes,
            charmap,
        })
    }

    /// First character of `text` the font has no glyph for.
    fn first_missing(&self, text: &str) -> Option<char> {
        let Some(map) = self.charmap.charmap(self.bytes.data()) else {
            return text.chars().next();
        };
        text.chars()
            .find(|&c| map.map(c).is_none_or(|gid| gid == 0))
    }
}

/// Renders symbol strings with fonts from a [`FontCatalog`].
///
/// Every font id gets its own Parley font context, so font `k` always renders font `k`
/// regardless of which other fonts this instance has loaded. One instance belongs to one worker.
pub struct GlyphRasterizer<'a> {
    catalog: &'a FontCatalog,
    layout_ctx: parley::LayoutContext<InkBrush>,
    fonts: HashMap<usize, FontSlot>,
}

impl<'a> GlyphRasterizer<'a> {
    /// Build a rasterizer over `catalog`. Fonts are loaded lazily on first use.
    pub fn new(catalog: &'a FontCatalog) -> Self {
        Self {
            catalog,
            layout_ctx: parley::LayoutContext::new(),
            fonts: HashMap::new(),
        }
    }

    /// Render `text` with font `font_id` into a `width x height` single-channel raster.
    ///
    /// Ink is 255 on a 0 background.
    pub fn rasterize(
        &mut self,
        font_id: usize,
        text: &str,
        width: u32,
        height: u32,
    ) -> OverlayResult<GrayImage> {
        if text.is_empty() {
            return Err(OverlayError::rendering("symbol string must be non-empty"));
        }
        if width == 0 || height == 0 {
            return Err(OverlayError::rendering("raster size must be non-zero"));
        }

        if !self.fonts.contains_key(&font_id) {
            let slot = FontSlot::load(self.catalog, font_id)?;
            self.fonts.insert(font_id, slot);
        }
        let slot = self
            .fonts
            .get_mut(&font_id)
            .ok_or_else(|| OverlayError::rendering(format!("font id {font_id} not loaded")))?;
        if let Some(c) = slot.first_missing(text) {
            return Err(OverlayError::rendering(format!(
                "font {font_id} ('{}') has no glyph for {c:?}",
                slot.family
            )));
        }
        let family = slot.family.clone();
        let layout = build_layout(&mut self.layout_ctx, &mut slot.font_ctx, &family, text);
        let gbox = GlyphBox::measure(layout.width(), layout.height())?;

        let working = (WORKING_OVERSAMPLE * width.max(height)).min(u32::from(u16::MAX));
        let side_px = working as u16;
        let scale = f64::from(working) / f64::from(gbox.side);
        let (ox, oy) = gbox.text_origin();

        let mut ctx = vello_cpu::RenderContext::new(side_px, side_px);
        ctx.set_transform(
            vello_cpu::kurbo::Affine::scale(scale) * vello_cpu::kurbo::Affine::translate((ox, oy)),
        );
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                if run.glyphs().any(|g| g.id == 0) {
                    return Err(OverlayError::rendering(format!(
                        "font {font_id} ('{family}') has no glyph for some of '{text}'"
                    )));
                }
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(run.run().font())
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(side_px, side_px);
        ctx.render_to_pixmap(&mut pixmap);

        let coverage: Vec<u8> = pixmap
            .data_as_u8_slice()
            .chunks_exact(4)
            .map(|px| px[3])
            .collect();
        let square = GrayImage::from_raw(working, working, coverage)
            .ok_or_else(|| OverlayError::rendering("glyph pixmap size mismatch"))?;

        Ok(image::imageops::resize(
            &square,
            width,
            height,
            FilterType::Triangle,
        ))
    }
}

fn build_layout(
    layout_ctx: &mut parley::LayoutContext<InkBrush>,
    font_ctx: &mut parley::FontContext,
    family: &str,
    text: &str,
) -> parley::Layout<InkBrush> {
    let mut builder = layout_ctx.ranged_builder(font_ctx, text, 1.0, true);
    builder.push_default(parley::style::StyleProperty::FontStack(
        parley::style::FontStack::Source(std::borrow::Cow::Owned(family.to_string())),
    ));
    builder.push_default(parley::style::StyleProperty::FontSize(NOMINAL_FONT_SIZE));
    builder.push_default(parley::style::StyleProperty::Brush(InkBrush));

    let mut layout: parley::Layout<InkBrush> = builder.build(text);
    layout.break_all_lines(None);
    layout
}

#[cfg(test)]
#[path = "../../tests/unit/glyphs/raster.rs"]
mod tests;
