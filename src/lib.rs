//! Ball Collision - a bounded 2D arena full of bouncing balls
//!
//! Core modules:
//! - `sim`: Deterministic simulation (balls, broad/narrow phase, integrator)
//! - `config`: Arena and population configuration
//! - `fps`: Moving-average frame rate smoother for the frame loop
//! - `error`: Startup/configuration errors

pub mod config;
pub mod error;
pub mod fps;
pub mod sim;

pub use config::SimConfig;
pub use error::{Error, Result};
pub use fps::{FpsCounter, MovingAverage};
pub use sim::{Ball, BallSnapshot, FrameReport, ProximityMatrix, World, advance};

use glam::Vec2;

/// Simulation configuration defaults
pub mod consts {
    /// Arena dimensions (pixels)
    pub const ARENA_WIDTH: f32 = 1024.0;
    pub const ARENA_HEIGHT: f32 = 768.0;

    /// Population bounds, the actual count is drawn from [MIN_BALLS, MAX_BALLS]
    pub const MIN_BALLS: usize = 100;
    pub const MAX_BALLS: usize = 300;

    /// Ball radius is drawn from [BASE_RADIUS, 2 * BASE_RADIUS)
    pub const BASE_RADIUS: f32 = 10.0;
    /// Ball speed is drawn from [BASE_SPEED, 2 * BASE_SPEED) (pixels/s)
    pub const BASE_SPEED: f32 = 60.0;

    /// Frames averaged by the FPS counter
    pub const FPS_WINDOW: usize = 100;
    /// Longest frame the driver will feed into the simulation (seconds)
    pub const MAX_FRAME_TIME: f32 = 0.25;
}

/// Unit vector for an angle in radians
#[inline]
pub fn direction_from_angle(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

/// Far corner of a ball's bounding box, which is also its center
#[inline]
pub fn corner(pos: Vec2, radius: f32) -> Vec2 {
    pos + Vec2::splat(radius)
}
