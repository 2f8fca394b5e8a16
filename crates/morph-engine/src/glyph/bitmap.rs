//! Off-screen luminance raster with a built-in 8×8 bitmap font.

use font8x8::{UnicodeFonts, BASIC_FONTS, GREEK_FONTS, LATIN_FONTS};

/// Glyph cells per character side in the bitmap font.
const CELL: usize = 8;

/// An 8-bit grayscale image, row-major, black background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Bitmap {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    /// Draw `text` in white, centered horizontally and vertically.
    ///
    /// `font_px` is the character height in pixels. A string wider than the
    /// canvas is shrunk to fit. Characters the font lacks keep their advance
    /// but draw nothing.
    pub fn render_text(width: usize, height: usize, text: &str, font_px: f32) -> Self {
        let mut bitmap = Self::new(width, height);
        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() || width == 0 || height == 0 {
            return bitmap;
        }

        let columns = (chars.len() * CELL) as f32;
        let dot = (font_px / CELL as f32).min(width as f32 / columns);
        let left = (width as f32 - columns * dot) / 2.0;
        let top = (height as f32 - CELL as f32 * dot) / 2.0;

        for (index, &c) in chars.iter().enumerate() {
            let Some(rows) = glyph_rows(c) else {
                continue;
            };
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..CELL {
                    if bits & (1 << col) == 0 {
                        continue;
                    }
                    let gx = (index * CELL + col) as f32;
                    let gy = row as f32;
                    bitmap.fill_rect(
                        left + gx * dot,
                        top + gy * dot,
                        left + (gx + 1.0) * dot,
                        top + (gy + 1.0) * dot,
                    );
                }
            }
        }
        bitmap
    }

    /// Fill the pixel span covering `[x0, x1) × [y0, y1)`, clipped to the canvas.
    fn fill_rect(&mut self, x0: f32, y0: f32, x1: f32, y1: f32) {
        let clip = |v: f32, max: usize| (v.round().max(0.0) as usize).min(max);
        let (x0, x1) = (clip(x0, self.width), clip(x1, self.width));
        let (y0, y1) = (clip(y0, self.height), clip(y1, self.height));
        for y in y0..y1 {
            let row = y * self.width;
            self.pixels[row + x0..row + x1].fill(u8::MAX);
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.pixels[y * self.width + x]
    }

    /// Pixels strictly brighter than `threshold`, scanning rows top to bottom.
    pub fn lit(&self, threshold: u8, stride: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        let stride = stride.max(1);
        (0..self.height).step_by(stride).flat_map(move |y| {
            (0..self.width)
                .step_by(stride)
                .filter(move |&x| self.get(x, y) > threshold)
                .map(move |x| (x, y))
        })
    }

    /// Inclusive pixel bounds `(min_x, min_y, max_x, max_y)` of lit pixels.
    pub fn lit_bounds(&self, threshold: u8) -> Option<(usize, usize, usize, usize)> {
        self.lit(threshold, 1).fold(None, |acc, (x, y)| match acc {
            None => Some((x, y, x, y)),
            Some((x0, y0, x1, y1)) => Some((x0.min(x), y0.min(y), x1.max(x), y1.max(y))),
        })
    }
}

fn glyph_rows(c: char) -> Option<[u8; 8]> {
    BASIC_FONTS
        .get(c)
        .or_else(|| LATIN_FONTS.get(c))
        .or_else(|| GREEK_FONTS.get(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_draws_nothing() {
        let bitmap = Bitmap::render_text(60, 30, "", 16.0);
        assert!(bitmap.lit_bounds(128).is_none());
        let bitmap = Bitmap::render_text(60, 30, "   ", 16.0);
        assert!(bitmap.lit_bounds(128).is_none());
    }

    #[test]
    fn digit_is_centered() {
        let bitmap = Bitmap::render_text(600, 300, "8", 200.0);
        let (x0, y0, x1, y1) = bitmap.lit_bounds(128).unwrap();
        // The 8×8 cell spans 200 px centered on the canvas.
        assert!(x0 >= 200 && x1 < 400, "x span {}..{}", x0, x1);
        assert!(y0 >= 50 && y1 < 250, "y span {}..{}", y0, y1);
    }

    #[test]
    fn long_text_is_shrunk_to_fit() {
        let bitmap = Bitmap::render_text(600, 300, "HAPPY BIRTHDAY", 160.0);
        let (x0, _, x1, _) = bitmap.lit_bounds(128).unwrap();
        assert!(x1 < 600);
        assert!(x1 - x0 > 300, "text should fill most of the width");
    }

    #[test]
    fn stride_skips_pixels() {
        let bitmap = Bitmap::render_text(64, 32, "#", 32.0);
        let all = bitmap.lit(128, 1).count();
        let strided = bitmap.lit(128, 2).count();
        assert!(strided > 0 && strided < all);
    }
}
