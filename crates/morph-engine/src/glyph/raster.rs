//! Extrude a text bitmap into a 3D point cloud sized for the pool.

use glam::Vec3;

use super::bitmap::Bitmap;
use crate::core::rng::Rng;
use crate::error::GlyphError;

/// Font size preset for a glyph string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphStyle {
    /// Single digits (countdown), drawn large.
    Numeric,
    /// Short phrases.
    Phrase,
}

impl GlyphStyle {
    pub fn font_px(self) -> f32 {
        match self {
            GlyphStyle::Numeric => 200.0,
            GlyphStyle::Phrase => 160.0,
        }
    }
}

/// Canvas and extrusion parameters.
#[derive(Debug, Clone)]
pub struct GlyphRasterizer {
    pub width: usize,
    pub height: usize,
    /// Luminance a pixel must exceed to count.
    pub threshold: u8,
    /// Sample every `stride`-th pixel in both directions.
    pub stride: usize,
    /// Depth slices emitted per lit pixel.
    pub layers: usize,
    pub depth_spacing: f32,
    /// World units per pixel.
    pub scale: f32,
    /// Full width of the random offset applied to duplicated points.
    pub jitter: f32,
}

impl Default for GlyphRasterizer {
    fn default() -> Self {
        Self {
            width: 600,
            height: 300,
            threshold: 128,
            stride: 1,
            layers: 3,
            depth_spacing: 2.0,
            scale: 0.18,
            jitter: 0.2,
        }
    }
}

impl GlyphRasterizer {
    pub fn render(&self, text: &str, style: GlyphStyle) -> Bitmap {
        Bitmap::render_text(self.width, self.height, text, style.font_px())
    }

    /// Rasterize `text`, extrude it facing a camera at `azimuth` radians around
    /// the vertical axis, and resample to exactly `count` points.
    pub fn rasterize(
        &self,
        text: &str,
        style: GlyphStyle,
        azimuth: f32,
        count: usize,
        rng: &mut Rng,
    ) -> Result<Vec<Vec3>, GlyphError> {
        if count == 0 {
            return Err(GlyphError::NoTargets);
        }
        let bitmap = self.render(text, style);
        let valid = self.extrude(&bitmap, azimuth);
        if valid.is_empty() {
            return Err(GlyphError::Blank(text.to_owned()));
        }
        log::debug!("glyph {:?}: {} extruded points for {} particles", text, valid.len(), count);
        Ok(resample(&valid, count, self.jitter, rng))
    }

    /// One point per lit pixel per depth layer, centered on the canvas, y up,
    /// rotated so the text plane faces the camera.
    pub fn extrude(&self, bitmap: &Bitmap, azimuth: f32) -> Vec<Vec3> {
        let (sin, cos) = azimuth.sin_cos();
        let half_w = bitmap.width() as f32 / 2.0;
        let half_h = bitmap.height() as f32 / 2.0;
        let mid_layer = (self.layers.max(1) - 1) as f32 / 2.0;

        let mut points = Vec::new();
        for (x, y) in bitmap.lit(self.threshold, self.stride) {
            let x0 = (x as f32 - half_w) * self.scale;
            let y0 = -(y as f32 - half_h) * self.scale;
            for layer in 0..self.layers.max(1) {
                let z0 = (layer as f32 - mid_layer) * self.depth_spacing;
                points.push(Vec3::new(x0 * cos + z0 * sin, y0, -x0 * sin + z0 * cos));
            }
        }
        points
    }
}

/// Source index chosen for output slot `i` when thinning `valid` points to `count`.
/// Returns 0 when there is nothing to pick from.
#[inline]
pub(crate) fn stride_index(i: usize, valid: usize, count: usize) -> usize {
    if valid == 0 || count == 0 {
        return 0;
    }
    let step = valid as f64 / count as f64;
    ((i as f64 * step).floor() as usize).min(valid - 1)
}

/// Fit `valid` points to exactly `count` slots.
///
/// More points than slots: evenly spaced indices, preserving the outline at
/// lower density. Fewer: all points in order, then random duplicates with a
/// small jitter so the glyph stays solid.
pub fn resample(valid: &[Vec3], count: usize, jitter: f32, rng: &mut Rng) -> Vec<Vec3> {
    if valid.is_empty() {
        return Vec::new();
    }
    if valid.len() > count {
        return (0..count).map(|i| valid[stride_index(i, valid.len(), count)]).collect();
    }

    let mut out = Vec::with_capacity(count);
    out.extend_from_slice(valid);
    while out.len() < count {
        let p = valid[rng.next_int(valid.len() as u32) as usize];
        out.push(p + Vec3::new(rng.signed(), rng.signed(), rng.signed()) * jitter);
    }
    out
}
