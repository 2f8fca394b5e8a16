pub mod api;
pub mod core;
pub mod particles;
pub mod shapes;
pub mod glyph;
pub mod effects;
pub mod bridge;
pub mod input;
pub mod extensions;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext, ViewState};
pub use api::types::{SoundEvent, GameEvent};
pub use crate::core::rng::Rng;
pub use crate::core::time::FixedTimestep;
pub use particles::{Particle, ParticlePool, RateSpec, Rgb};
pub use shapes::{CakeBand, ShapeKind, ShapeLibrary, Shell};
pub use glyph::{GlyphRasterizer, GlyphStyle};
pub use effects::{EffectsState, FireworkBurst};
pub use input::queue::{InputEvent, InputQueue};
pub use bridge::protocol::ProtocolLayout;
pub use error::{ConfigError, GlyphError};

pub use extensions::{Easing, ease, lerp, Tween, Sequencer, SequenceId};

pub use glam::Vec3;
