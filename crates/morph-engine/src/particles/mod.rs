pub mod color;
pub mod pool;

pub use color::{Hsl, Rgb};
pub use pool::{Particle, ParticlePool, RateSpec, BREATH_AMPLITUDE};
