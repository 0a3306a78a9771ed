//! Ball entity
//!
//! `pos` is the top-left corner of the ball's bounding box, so the center is
//! `pos + radius` on both axes. Renderers draw circles from that anchor.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::{corner, direction_from_angle};

/// A ball entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Top-left anchor of the bounding box
    pub pos: Vec2,
    /// Unit direction of travel
    pub dir: Vec2,
    pub radius: f32,
    /// Scalar speed along `dir` (pixels/s)
    pub speed: f32,
}

impl Ball {
    /// Create a ball; `dir` is normalized (a zero direction becomes +X)
    pub fn new(pos: Vec2, dir: Vec2, radius: f32, speed: f32) -> Self {
        let dir = dir.try_normalize().unwrap_or(Vec2::X);
        Self {
            pos,
            dir,
            radius,
            speed,
        }
    }

    /// Random ball fully inside the arena
    pub fn random<R: Rng>(rng: &mut R, config: &SimConfig) -> Self {
        let radius = config.base_radius + rng.random::<f32>() * config.base_radius;
        let speed = config.base_speed + rng.random::<f32>() * config.base_speed;
        let angle = rng.random::<f32>() * std::f32::consts::TAU;

        let span = (config.arena() - Vec2::splat(2.0 * radius)).max(Vec2::ZERO);
        let pos = Vec2::new(rng.random::<f32>() * span.x, rng.random::<f32>() * span.y);

        Self {
            pos,
            dir: direction_from_angle(angle),
            radius,
            speed,
        }
    }

    /// Center of the circle
    #[inline]
    pub fn center(&self) -> Vec2 {
        corner(self.pos, self.radius)
    }

    /// Velocity vector (direction * speed)
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.dir * self.speed
    }

    /// Move along the current direction for `dt` seconds
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.pos += self.dir * (self.speed * dt);
    }

    /// Why this ball breaks the entity invariants, if it does
    pub fn invalid_reason(&self) -> Option<&'static str> {
        if !self.pos.is_finite() {
            Some("position is not finite")
        } else if !(self.radius.is_finite() && self.radius > 0.0) {
            Some("radius must be positive")
        } else if !(self.speed.is_finite() && self.speed >= 0.0) {
            Some("speed must be non-negative")
        } else if !self.dir.is_finite() || (self.dir.length() - 1.0).abs() > 1e-3 {
            Some("direction must be a unit vector")
        } else {
            None
        }
    }

    pub fn snapshot(&self) -> BallSnapshot {
        BallSnapshot {
            pos: self.pos,
            radius: self.radius,
        }
    }
}

/// What a renderer needs to draw one ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallSnapshot {
    pub pos: Vec2,
    pub radius: f32,
}
