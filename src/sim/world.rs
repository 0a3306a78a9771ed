//! Simulation world
//!
//! Owns the balls and the proximity matrix for one run. The population is
//! fixed once the world is built.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::ball::{Ball, BallSnapshot};
use super::proximity::ProximityMatrix;
use super::tick::{FrameReport, advance};
use crate::config::SimConfig;
use crate::error::{Error, Result};

/// Complete simulation state (deterministic for a given seed)
#[derive(Debug, Clone)]
pub struct World {
    config: SimConfig,
    /// Seed the population was drawn from, if random
    seed: Option<u64>,
    balls: Vec<Ball>,
    proximity: ProximityMatrix,
    quantum: f32,
    /// Frames advanced so far
    frames: u64,
}

impl World {
    /// Random population in `[min_balls, max_balls]` drawn from `seed`
    pub fn new(config: SimConfig, seed: u64) -> Result<Self> {
        config.validate()?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let count = rng.random_range(config.min_balls..=config.max_balls);
        let balls = (0..count)
            .map(|_| Ball::random(&mut rng, &config))
            .collect();

        let mut world = Self::build(config, balls);
        world.seed = Some(seed);
        log::info!(
            "Spawned {} balls in {}x{} arena (seed {seed})",
            world.balls.len(),
            world.config.arena_width,
            world.config.arena_height
        );
        Ok(world)
    }

    /// World with an explicit population
    pub fn from_balls(config: SimConfig, balls: Vec<Ball>) -> Result<Self> {
        config.validate()?;

        if balls.len() > config.max_balls {
            return Err(Error::PopulationExceedsCapacity {
                count: balls.len(),
                capacity: config.max_balls,
            });
        }
        if let Some((index, reason)) = balls
            .iter()
            .enumerate()
            .find_map(|(i, b)| b.invalid_reason().map(|r| (i, r)))
        {
            return Err(Error::InvalidBall {
                index,
                reason: reason.to_string(),
            });
        }

        Ok(Self::build(config, balls))
    }

    fn build(config: SimConfig, balls: Vec<Ball>) -> Self {
        let proximity = ProximityMatrix::new(&balls, config.distance_unit());
        let quantum = config.time_quantum();
        Self {
            config,
            seed: None,
            balls,
            proximity,
            quantum,
            frames: 0,
        }
    }

    /// Play `elapsed` seconds of motion, then resolve contacts
    pub fn advance(&mut self, elapsed: f32) -> FrameReport {
        let arena = self.arena();
        let report = advance(
            &mut self.balls,
            &mut self.proximity,
            arena,
            elapsed,
            self.quantum,
        );
        self.frames += 1;
        log::debug!(
            "Frame {}: {} substeps, {} contacts, {} resolved",
            self.frames,
            report.substeps,
            report.contacts,
            report.resolved
        );
        report
    }

    /// Positions and radii for drawing
    pub fn snapshot(&self) -> Vec<BallSnapshot> {
        self.balls.iter().map(Ball::snapshot).collect()
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn proximity(&self) -> &ProximityMatrix {
        &self.proximity
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn time_quantum(&self) -> f32 {
        self.quantum
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[inline]
    pub fn arena(&self) -> Vec2 {
        self.config.arena()
    }
}
