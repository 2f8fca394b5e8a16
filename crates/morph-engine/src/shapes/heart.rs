//! Heart surface by rejection sampling.
//!
//! Accepts points inside `(x² + 9/4 z² + y² − 1)³ − (x² + 9/80 z²) y³ ≤ 0`
//! in normalized coordinates, y up, then scales them back out.

use glam::Vec3;

use crate::core::rng::Rng;

/// World units per normalized unit.
pub const HEART_SCALE: f32 = 12.0;

/// Implicit heart function in normalized coordinates. Inside when `<= 0`.
#[inline]
pub fn heart_field(p: Vec3) -> f32 {
    let (x2, y3, z2) = (p.x * p.x, p.y * p.y * p.y, p.z * p.z);
    let a = x2 + 2.25 * z2 + p.y * p.y - 1.0;
    a * a * a - (x2 + 0.1125 * z2) * y3
}

/// Draw `count` points inside the heart volume.
///
/// Candidates come from a box 3 units wide in x and y and 1.5 deep in z.
/// There is no attempt cap.
pub fn heart(count: usize, rng: &mut Rng) -> Vec<Vec3> {
    let mut points = Vec::with_capacity(count);
    while points.len() < count {
        let candidate = Vec3::new(
            rng.signed() * 3.0 * HEART_SCALE,
            rng.signed() * 3.0 * HEART_SCALE,
            rng.signed() * 1.5 * HEART_SCALE,
        );
        if heart_field(candidate / HEART_SCALE) <= 0.0 {
            points.push(candidate);
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_point_is_inside() {
        let mut rng = Rng::new(5);
        let points = heart(2000, &mut rng);
        assert_eq!(points.len(), 2000);
        for p in &points {
            assert!(heart_field(*p / HEART_SCALE) <= 1e-6, "outside: {:?}", p);
        }
    }

    #[test]
    fn field_sign_at_known_points() {
        assert!(heart_field(Vec3::ZERO) < 0.0);
        assert!(heart_field(Vec3::new(1.4, 0.0, 0.0)) > 0.0);
        assert!(heart_field(Vec3::new(0.0, 0.0, 0.9)) > 0.0);
    }

    #[test]
    fn stays_inside_sampling_box() {
        let mut rng = Rng::new(8);
        for p in heart(500, &mut rng) {
            assert!(p.x.abs() <= 1.5 * HEART_SCALE);
            assert!(p.y.abs() <= 1.5 * HEART_SCALE);
            assert!(p.z.abs() <= 0.75 * HEART_SCALE);
        }
    }
}
