use thiserror::Error;

/// Rejected engine or game configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("pool size must be at least 1")]
    EmptyPool,
    #[error("fixed timestep must be positive, got {0}")]
    InvalidTimestep(f32),
    #[error("{field} must be {expected}, got {value}")]
    OutOfRange {
        field: &'static str,
        expected: &'static str,
        value: f32,
    },
}

/// Glyph rasterization failures. The caller keeps the pool's previous targets.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GlyphError {
    #[error("{0:?} produced no lit pixels")]
    Blank(String),
    #[error("target count must be at least 1")]
    NoTargets,
}
