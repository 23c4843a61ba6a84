/// Per-planet orbital speeds, validated where they enter the game.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::bodies::{PLANETS, PLANET_COUNT};

/// Default speed table (pivot turns `speed / 1000` radians per frame).
pub const DEFAULT_SPEEDS: [f32; PLANET_COUNT] = [4.7, 3.5, 2.9, 2.4, 1.3, 0.9, 0.6, 0.5];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpeedError {
    #[error("speed {0:?} is not a number")]
    NotANumber(String),
    #[error("speed {0} is not finite")]
    NotFinite(f32),
    #[error("no planet with index {0}")]
    UnknownPlanet(usize),
}

/// A finite orbital speed. Negative values orbit backwards.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Speed(f32);

impl Speed {
    pub fn new(value: f32) -> Result<Self, SpeedError> {
        if value.is_finite() {
            Ok(Self(value))
        } else {
            Err(SpeedError::NotFinite(value))
        }
    }

    pub fn value(self) -> f32 {
        self.0
    }
}

impl FromStr for Speed {
    type Err = SpeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value: f32 = trimmed
            .parse()
            .map_err(|_| SpeedError::NotANumber(trimmed.to_string()))?;
        Self::new(value)
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One speed per planet, indexed like `bodies::PLANETS`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedTable {
    speeds: [Speed; PLANET_COUNT],
}

impl Default for SpeedTable {
    fn default() -> Self {
        Self {
            speeds: DEFAULT_SPEEDS.map(Speed),
        }
    }
}

impl SpeedTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, planet: usize) -> Option<Speed> {
        self.speeds.get(planet).copied()
    }

    pub fn set(&mut self, planet: usize, speed: Speed) -> Result<(), SpeedError> {
        let slot = self
            .speeds
            .get_mut(planet)
            .ok_or(SpeedError::UnknownPlanet(planet))?;
        *slot = speed;
        Ok(())
    }

    /// Set from a raw number. Non-finite values are rejected and the
    /// previous speed kept.
    pub fn set_value(&mut self, planet: usize, value: f32) -> Result<Speed, SpeedError> {
        let speed = Speed::new(value)?;
        self.set(planet, speed)?;
        Ok(speed)
    }

    /// Restore the default table.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// `(planet name, speed)` pairs in planet order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Speed)> + '_ {
        PLANETS.iter().map(|p| p.name).zip(self.speeds.iter().copied())
    }
}
