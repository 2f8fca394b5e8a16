//! Transient explosion shapes built on demand rather than precomputed.

use glam::Vec3;

use crate::core::rng::Rng;

/// A spherical shell of points with a radius band, then stretched and shifted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shell {
    pub min_radius: f32,
    pub max_radius: f32,
    /// Per-axis multiplier applied after sampling.
    pub stretch: Vec3,
    pub offset: Vec3,
}

impl Shell {
    pub const fn new(min_radius: f32, max_radius: f32) -> Self {
        Self {
            min_radius,
            max_radius,
            stretch: Vec3::ONE,
            offset: Vec3::ZERO,
        }
    }

    pub fn with_stretch(mut self, stretch: Vec3) -> Self {
        self.stretch = stretch;
        self
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    pub fn sample(&self, rng: &mut Rng) -> Vec3 {
        let r = rng.range(self.min_radius, self.max_radius);
        rng.unit_sphere() * r * self.stretch + self.offset
    }

    pub fn points(&self, count: usize, rng: &mut Rng) -> Vec<Vec3> {
        (0..count).map(|_| self.sample(rng)).collect()
    }
}

/// Radial blast distance band.
pub const BLAST_FORCE: (f32, f32) = (100.0, 300.0);

/// Positions within this distance of the origin on every axis get a random heading.
const BLAST_DEAD_ZONE: f32 = 0.1;

/// Push every point outward from the origin along its own heading.
///
/// Points sitting at the origin (on all three axes) have no heading of their own
/// and are sent in a random direction instead.
pub fn radial_blast<I>(current: I, rng: &mut Rng) -> Vec<Vec3>
where
    I: IntoIterator<Item = Vec3>,
{
    current
        .into_iter()
        .map(|p| {
            let heading = if p.abs().max_element() < BLAST_DEAD_ZONE {
                let mut dir = Vec3::new(rng.signed(), rng.signed(), rng.signed());
                if dir.length_squared() < 1e-8 {
                    dir = Vec3::Y;
                }
                dir
            } else {
                p
            };
            heading.normalize() * rng.range(BLAST_FORCE.0, BLAST_FORCE.1)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_respects_radius_band() {
        let mut rng = Rng::new(6);
        let shell = Shell::new(60.0, 80.0);
        for p in shell.points(1000, &mut rng) {
            let r = p.length();
            assert!(r >= 60.0 - 1e-3 && r <= 80.0 + 1e-3, "radius {}", r);
        }
    }

    #[test]
    fn stretched_shell_is_flattened() {
        let mut rng = Rng::new(7);
        let shell = Shell::new(30.0, 70.0)
            .with_stretch(Vec3::new(1.8, 1.0, 0.5))
            .with_offset(Vec3::new(0.0, 5.0, 0.0));
        for p in shell.points(1000, &mut rng) {
            assert!(p.z.abs() <= 35.0 + 1e-3);
            assert!(p.x.abs() <= 126.0 + 1e-3);
            assert!(p.y <= 75.0 + 1e-3 && p.y >= -65.0 - 1e-3);
        }
    }

    #[test]
    fn blast_keeps_heading_and_band() {
        let mut rng = Rng::new(8);
        let start = vec![Vec3::new(3.0, 4.0, 0.0), Vec3::ZERO, Vec3::new(0.05, -0.05, 0.0)];
        let out = radial_blast(start.iter().copied(), &mut rng);
        assert_eq!(out.len(), 3);
        let d = out[0].normalize();
        assert!((d - Vec3::new(0.6, 0.8, 0.0)).length() < 1e-4);
        for p in &out {
            assert!(p.is_finite());
            let len = p.length();
            assert!(len >= BLAST_FORCE.0 - 1e-2 && len <= BLAST_FORCE.1 + 1e-2);
        }
    }
}
