//! Pipeline configuration. Defaults match the catalog viewer's behaviour.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ExoscapeError};

/// Largest texture edge the synthesizer accepts.
pub const MAX_TEXTURE_SIZE: u32 = 4096;

/// Time-acceleration slider domain.
pub const TIME_ACCELERATION_MIN: f64 = 1.0;
pub const TIME_ACCELERATION_MAX: f64 = 200.0;

/// Knobs for the visual stages. The classification thresholds are fixed and
/// deliberately not configurable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Edge length of the square surface texture, in pixels.
    pub texture_size: u32,
    pub min_time_acceleration: f64,
    pub max_time_acceleration: f64,
    /// Chance that a gaseous planet is drawn with rings.
    pub ring_probability: f64,
    /// Mixed into every per-planet seed; change it to reroll all textures.
    pub texture_seed_salt: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            texture_size: 512,
            min_time_acceleration: TIME_ACCELERATION_MIN,
            max_time_acceleration: TIME_ACCELERATION_MAX,
            ring_probability: 0.30,
            texture_seed_salt: 0,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.texture_size == 0 || self.texture_size > MAX_TEXTURE_SIZE {
            return Err(ConfigError::TextureSize {
                got: self.texture_size,
                max: MAX_TEXTURE_SIZE,
            });
        }
        let (min, max) = (self.min_time_acceleration, self.max_time_acceleration);
        let in_domain = |v: f64| (TIME_ACCELERATION_MIN..=TIME_ACCELERATION_MAX).contains(&v);
        if !in_domain(min) || !in_domain(max) || min > max {
            return Err(ConfigError::TimeAcceleration { min, max });
        }
        if !(0.0..=1.0).contains(&self.ring_probability) {
            return Err(ConfigError::RingProbability(self.ring_probability));
        }
        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ExoscapeError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(PipelineConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_texture_size_rejected() {
        let cfg = PipelineConfig { texture_size: 0, ..PipelineConfig::default() };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::TextureSize { got: 0, max: MAX_TEXTURE_SIZE })
        );
    }

    #[test]
    fn inverted_acceleration_bounds_rejected() {
        let cfg = PipelineConfig {
            min_time_acceleration: 150.0,
            max_time_acceleration: 20.0,
            ..PipelineConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::TimeAcceleration { .. })));
    }

    #[test]
    fn ring_probability_out_of_range_rejected() {
        let cfg = PipelineConfig { ring_probability: 1.5, ..PipelineConfig::default() };
        assert_eq!(cfg.validate(), Err(ConfigError::RingProbability(1.5)));
    }

    #[test]
    fn from_json_fills_missing_fields() {
        let cfg = PipelineConfig::from_json(r#"{ "texture_size": 256 }"#).unwrap();
        assert_eq!(cfg.texture_size, 256);
        assert_eq!(cfg.max_time_acceleration, 200.0);
        assert_eq!(cfg.ring_probability, 0.30);
    }

    #[test]
    fn from_json_reports_invalid_values() {
        let err = PipelineConfig::from_json(r#"{ "texture_size": 100000 }"#).unwrap_err();
        assert!(matches!(err, ExoscapeError::Config(ConfigError::TextureSize { .. })));
    }
}
