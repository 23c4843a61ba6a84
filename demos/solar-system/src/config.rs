/// Scene tuning, loadable from JSON. Missing fields take the defaults.

use serde::{Deserialize, Serialize};
use orrery_engine::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolarConfig {
    /// Stars scattered uniformly in a cube around the origin.
    pub star_count: usize,
    /// Half-width of the star cube.
    pub star_spread: f32,
    pub star_size: f32,
    pub star_seed: u64,
    /// Sun self-rotation per frame (radians). Runs even while paused.
    pub sun_spin: f32,
    /// Planet self-rotation per frame (radians).
    pub planet_spin: f32,
    /// Pivot rotation per frame is `speed / speed_divisor` radians.
    pub speed_divisor: f32,
    /// Emissive color of the selected planet, `0xRRGGBB`.
    pub highlight_color: u32,
}

impl Default for SolarConfig {
    fn default() -> Self {
        Self {
            star_count: 10_000,
            star_spread: 1000.0,
            star_size: 0.7,
            star_seed: 0x5eed_57a2,
            sun_spin: 0.001,
            planet_spin: 0.005,
            speed_divisor: 1000.0,
            highlight_color: 0x444444,
        }
    }
}

impl SolarConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.speed_divisor.is_finite() && self.speed_divisor != 0.0) {
            return Err(ConfigError::Invalid(format!(
                "speed_divisor must be finite and non-zero, got {}",
                self.speed_divisor
            )));
        }
        if !(self.star_spread >= 0.0 && self.star_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "star_spread {} / star_size {} out of range",
                self.star_spread, self.star_size
            )));
        }
        if !(self.sun_spin.is_finite() && self.planet_spin.is_finite()) {
            return Err(ConfigError::Invalid("spin rates must be finite".into()));
        }
        Ok(())
    }
}
