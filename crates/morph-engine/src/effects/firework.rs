//! Background firework bursts: small point clouds that grow and fade on their own clock.

use glam::Vec3;

use crate::core::rng::Rng;
use crate::extensions::{Easing, Tween};
use crate::particles::Rgb;
use crate::shapes::Shell;

/// Kernel radius of a burst before scaling.
const KERNEL: Shell = Shell::new(0.0, 2.0);
const START_OPACITY: f32 = 0.9;
/// Fraction of the lifetime spent before the fade begins.
const FADE_START: f32 = 0.6;

/// One self-contained burst.
#[derive(Debug, Clone)]
pub struct FireworkBurst {
    pub center: Vec3,
    offsets: Vec<Vec3>,
    colors: Vec<Rgb>,
    age: f32,
    scale: Tween,
    opacity: Tween,
}

impl FireworkBurst {
    /// Spawn near `bias` on x (±40), or anywhere in ±100 when `bias` is 0.
    pub fn spawn(bias: f32, rng: &mut Rng) -> Self {
        let count = 80 + rng.next_int(50) as usize;

        let x = if bias == 0.0 {
            rng.signed() * 200.0
        } else {
            bias + rng.signed() * 80.0
        };
        let y = rng.signed() * 100.0;
        let z = -20.0 - rng.next_f32() * 40.0;

        let hue = rng.next_f32();
        let offsets = KERNEL.points(count, rng);
        let colors = (0..count)
            .map(|_| Rgb::from_hsl(hue + rng.signed() * 0.2, 1.0, rng.range(0.6, 0.8)))
            .collect();

        let duration = rng.range(1.5, 2.5);
        Self {
            center: Vec3::new(x, y, z),
            offsets,
            colors,
            age: 0.0,
            scale: Tween::new(1.0, 20.0, duration, Easing::QuadOut),
            opacity: Tween::new(START_OPACITY, 0.0, duration * (1.0 - FADE_START), Easing::QuadIn)
                .with_delay(duration * FADE_START),
        }
    }

    /// Advance the burst. Returns false once it has fully faded.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.age += dt;
        !self.opacity.is_complete(self.age)
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn scale(&self) -> f32 {
        self.scale.value(self.age)
    }

    pub fn opacity(&self) -> f32 {
        self.opacity.value(self.age)
    }

    pub fn duration(&self) -> f32 {
        self.opacity.end()
    }

    /// Append up to `budget` points as `x y z r g b a` to `out`. Returns points written.
    pub fn write_vertices(&self, out: &mut Vec<f32>, budget: usize) -> usize {
        let scale = self.scale();
        let alpha = self.opacity();
        let n = self.offsets.len().min(budget);
        for (offset, color) in self.offsets.iter().zip(&self.colors).take(n) {
            let p = self.center + *offset * scale;
            out.extend_from_slice(&[p.x, p.y, p.z, color.r, color.g, color.b, alpha]);
        }
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_ranges() {
        let mut rng = Rng::new(11);
        for _ in 0..200 {
            let burst = FireworkBurst::spawn(-60.0, &mut rng);
            assert!((80..130).contains(&burst.len()));
            assert!(burst.center.x >= -100.0 && burst.center.x < -20.0);
            assert!(burst.center.y >= -50.0 && burst.center.y < 50.0);
            assert!(burst.center.z > -60.0 && burst.center.z <= -20.0);
            assert!(burst.offsets.iter().all(|o| o.length() <= 2.0 + 1e-4));
            let d = burst.duration();
            assert!(d > 1.499 && d < 2.501, "duration {}", d);
        }
    }

    #[test]
    fn unbiased_spawn_covers_full_width() {
        let mut rng = Rng::new(12);
        let xs: Vec<f32> = (0..300).map(|_| FireworkBurst::spawn(0.0, &mut rng).center.x).collect();
        assert!(xs.iter().all(|x| (-100.0..100.0).contains(x)));
        assert!(xs.iter().any(|x| *x < -50.0));
        assert!(xs.iter().any(|x| *x > 50.0));
    }

    #[test]
    fn grows_then_fades() {
        let mut rng = Rng::new(13);
        let mut burst = FireworkBurst::spawn(60.0, &mut rng);
        let duration = burst.duration();
        assert_eq!(burst.scale(), 1.0);
        assert!((burst.opacity() - 0.9).abs() < 1e-6);

        assert!(burst.tick(duration * 0.5));
        assert!(burst.scale() > 10.0);
        assert!((burst.opacity() - 0.9).abs() < 1e-6);

        assert!(burst.tick(duration * 0.3));
        assert!(burst.opacity() < 0.9 && burst.opacity() > 0.0);

        assert!(!burst.tick(duration * 0.3));
        assert!((burst.scale() - 20.0).abs() < 1e-4);
        assert!(burst.opacity().abs() < 1e-6);
    }

    #[test]
    fn vertices_are_interleaved() {
        let mut rng = Rng::new(14);
        let burst = FireworkBurst::spawn(0.0, &mut rng);
        let mut out = Vec::new();
        assert_eq!(burst.write_vertices(&mut out, 10), 10);
        assert_eq!(out.len(), 70);
        assert!((out[6] - 0.9).abs() < 1e-6);

        out.clear();
        assert_eq!(burst.write_vertices(&mut out, usize::MAX), burst.len());
    }
}
