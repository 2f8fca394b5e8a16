//! Closed-form point sets: sphere shell, floating cloud, background starfield.

use glam::Vec3;

use crate::core::rng::Rng;

pub const SPHERE_RADIUS: f32 = 20.0;

/// Half-extents of the cloud box.
pub const CLOUD_EXTENT: Vec3 = Vec3::new(80.0, 50.0, 50.0);

/// Half-extent of the starfield cube.
pub const STARFIELD_EXTENT: f32 = 200.0;

/// Uniform points on a sphere surface of radius 20.
pub fn sphere(count: usize, rng: &mut Rng) -> Vec<Vec3> {
    (0..count).map(|_| rng.unit_sphere() * SPHERE_RADIUS).collect()
}

/// Uniform scatter through a wide box, read as particles drifting in the air.
pub fn cloud(count: usize, rng: &mut Rng) -> Vec<Vec3> {
    (0..count)
        .map(|_| {
            Vec3::new(
                rng.signed() * 2.0 * CLOUD_EXTENT.x,
                rng.signed() * 2.0 * CLOUD_EXTENT.y,
                rng.signed() * 2.0 * CLOUD_EXTENT.z,
            )
        })
        .collect()
}

/// Static background stars, uniform through a 400-unit cube.
pub fn starfield(count: usize, rng: &mut Rng) -> Vec<Vec3> {
    (0..count)
        .map(|_| {
            Vec3::new(
                rng.signed() * 2.0 * STARFIELD_EXTENT,
                rng.signed() * 2.0 * STARFIELD_EXTENT,
                rng.signed() * 2.0 * STARFIELD_EXTENT,
            )
        })
        .collect()
}
