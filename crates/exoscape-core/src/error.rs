//! Error types for the ambient edges of the pipeline (config, colour parsing,
//! catalog loading). The pipeline stages themselves are infallible.

use thiserror::Error;

/// Invalid `PipelineConfig` field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("texture size must be in 1..={max}, got {got}")]
    TextureSize { got: u32, max: u32 },

    #[error("time acceleration bounds must satisfy 1 <= min <= max <= 200, got [{min}, {max}]")]
    TimeAcceleration { min: f64, max: f64 },

    #[error("ring probability must be within [0, 1], got {0}")]
    RingProbability(f64),
}

/// Malformed `#rrggbb` colour string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid hex colour {0:?}: expected #rrggbb")]
pub struct ColorParseError(pub String);

#[derive(Debug, Error)]
pub enum ExoscapeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
