//! Procedural target shapes for the particle pool.
//!
//! Every generator returns exactly `count` points, index-aligned with the pool:
//! point `i` is where particle `i` goes.

pub mod burst;
pub mod cake;
pub mod heart;
pub mod scatter;

use glam::Vec3;

use crate::core::rng::Rng;

pub use burst::{radial_blast, Shell};
pub use cake::CakeBand;

/// Named silhouettes the pool can assume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Sphere,
    Heart,
    Cake,
    Cloud,
    /// The most recently rasterized glyph string.
    Text,
}

/// Precomputed, index-aligned target sets, built once per session.
///
/// The text slot starts empty and is overwritten by each glyph rasterization.
pub struct ShapeLibrary {
    count: usize,
    sphere: Vec<Vec3>,
    heart: Vec<Vec3>,
    cake: Vec<Vec3>,
    cake_bands: Vec<CakeBand>,
    cloud: Vec<Vec3>,
    text: Vec<Vec3>,
}

impl ShapeLibrary {
    /// Generate every fixed shape for a pool of `count` particles.
    pub fn generate(count: usize, rng: &mut Rng) -> Self {
        let heart = heart::heart(count, rng);
        let (cake, cake_bands) = cake::cake_with_bands(count, rng).into_iter().unzip();
        let sphere = scatter::sphere(count, rng);
        let cloud = scatter::cloud(count, rng);
        log::debug!("shape library generated for {} particles", count);

        Self {
            count,
            sphere,
            heart,
            cake,
            cake_bands,
            cloud,
            text: Vec::new(),
        }
    }

    /// Pool size the library was generated for.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Target set for a shape. The text slot is empty until a glyph is stored.
    pub fn get(&self, kind: ShapeKind) -> &[Vec3] {
        match kind {
            ShapeKind::Sphere => &self.sphere,
            ShapeKind::Heart => &self.heart,
            ShapeKind::Cake => &self.cake,
            ShapeKind::Cloud => &self.cloud,
            ShapeKind::Text => &self.text,
        }
    }

    /// Band of each cake target, index-aligned with `get(ShapeKind::Cake)`.
    pub fn cake_bands(&self) -> &[CakeBand] {
        &self.cake_bands
    }

    /// Replace the text slot with a freshly rasterized glyph set.
    pub fn set_text(&mut self, points: Vec<Vec3>) {
        self.text = points;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_shape_matches_pool_size() {
        let mut rng = Rng::new(31);
        let lib = ShapeLibrary::generate(1234, &mut rng);
        for kind in [ShapeKind::Sphere, ShapeKind::Heart, ShapeKind::Cake, ShapeKind::Cloud] {
            assert_eq!(lib.get(kind).len(), 1234, "{:?}", kind);
        }
        assert_eq!(lib.cake_bands().len(), 1234);
        assert!(lib.get(ShapeKind::Text).is_empty());
    }

    #[test]
    fn text_slot_is_replaceable() {
        let mut rng = Rng::new(32);
        let mut lib = ShapeLibrary::generate(4, &mut rng);
        lib.set_text(vec![Vec3::X; 4]);
        assert_eq!(lib.get(ShapeKind::Text), &[Vec3::X; 4]);
    }
}
