//! Simulation configuration
//!
//! Read once at startup (defaults or a JSON file) and never changed while
//! the frame loop runs.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

/// Arena, population and randomization ranges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Arena extent along X (pixels)
    pub arena_width: f32,
    /// Arena extent along Y (pixels)
    pub arena_height: f32,
    /// Smallest population drawn at startup
    pub min_balls: usize,
    /// Largest population, also the capacity of the world
    pub max_balls: usize,
    /// Radius range is [base_radius, 2 * base_radius)
    pub base_radius: f32,
    /// Speed range is [base_speed, 2 * base_speed)
    pub base_speed: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            min_balls: MIN_BALLS,
            max_balls: MAX_BALLS,
            base_radius: BASE_RADIUS,
            base_speed: BASE_SPEED,
        }
    }
}

impl SimConfig {
    /// Parse a JSON document; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(Error::InvalidConfig(msg));

        if !(self.arena_width.is_finite() && self.arena_width > 0.0)
            || !(self.arena_height.is_finite() && self.arena_height > 0.0)
        {
            return invalid(format!(
                "arena must be positive, got {}x{}",
                self.arena_width, self.arena_height
            ));
        }
        if !(self.base_radius.is_finite() && self.base_radius > 0.0) {
            return invalid(format!("base_radius must be > 0, got {}", self.base_radius));
        }
        if !(self.base_speed.is_finite() && self.base_speed > 0.0) {
            return invalid(format!("base_speed must be > 0, got {}", self.base_speed));
        }
        if self.max_balls == 0 {
            return invalid("max_balls must be at least 1".to_string());
        }
        if self.min_balls > self.max_balls {
            return invalid(format!(
                "min_balls ({}) exceeds max_balls ({})",
                self.min_balls, self.max_balls
            ));
        }
        // Largest ball is 2 * base_radius, so its box is 4 * base_radius wide
        let largest = 4.0 * self.base_radius;
        if self.arena_width < largest || self.arena_height < largest {
            return invalid(format!(
                "arena {}x{} cannot fit a ball of diameter {}",
                self.arena_width, self.arena_height, largest
            ));
        }
        Ok(())
    }

    /// Arena extent as a vector
    #[inline]
    pub fn arena(&self) -> Vec2 {
        Vec2::new(self.arena_width, self.arena_height)
    }

    /// Sub-step duration: the fastest ball (2 * base_speed) covers a quarter
    /// of the smallest radius
    #[inline]
    pub fn time_quantum(&self) -> f32 {
        self.base_radius / (8.0 * self.base_speed)
    }

    /// Physical length of one proximity "radius unit"
    #[inline]
    pub fn distance_unit(&self) -> f32 {
        2.0 * self.base_radius
    }
}
