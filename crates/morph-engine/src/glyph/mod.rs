//! Text and number glyphs as particle targets.

pub mod bitmap;
pub mod raster;

pub use bitmap::Bitmap;
pub use raster::{resample, GlyphRasterizer, GlyphStyle};
