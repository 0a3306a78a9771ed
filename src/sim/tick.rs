//! Frame step: sub-stepped motion, then one collision pass
//!
//! Motion is split into fixed quanta so no ball moves more than a quarter
//! of the smallest radius between position updates. Collisions are only
//! looked at once, against the end-of-frame positions.

use glam::Vec2;

use super::ball::Ball;
use super::collision::{ContactOutcome, balls_interact, bounce_off_walls, resolve_ball_collision};
use super::proximity::{CONTACT, ProximityMatrix};

/// What happened during one call to [`advance`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameReport {
    /// Position updates applied to every ball
    pub substeps: u32,
    /// Time the balls actually travelled (seconds)
    pub simulated_time: f32,
    /// Pairs the narrow phase confirmed in contact
    pub contacts: u32,
    /// Contacts that changed velocities
    pub resolved: u32,
    /// Contacts skipped because the centers coincide
    pub degenerate: u32,
    /// Balls whose direction was forced by a wall
    pub wall_bounces: u32,
}

impl FrameReport {
    /// Accumulate another report into this one
    pub fn merge(&mut self, other: &FrameReport) {
        self.substeps += other.substeps;
        self.simulated_time += other.simulated_time;
        self.contacts += other.contacts;
        self.resolved += other.resolved;
        self.degenerate += other.degenerate;
        self.wall_bounces += other.wall_bounces;
    }
}

/// Advance every ball by `elapsed` seconds and resolve the resulting contacts
///
/// - `elapsed < quantum`: a single move of `elapsed`.
/// - otherwise: `floor(elapsed / quantum)` whole quanta; the remainder
///   below one quantum is dropped.
///
/// The collision pass runs once afterwards regardless.
pub fn advance(
    balls: &mut [Ball],
    proximity: &mut ProximityMatrix,
    arena: Vec2,
    elapsed: f32,
    quantum: f32,
) -> FrameReport {
    let mut report = move_balls(balls, elapsed, quantum);

    if proximity.ball_count() != balls.len() {
        log::warn!(
            "Proximity matrix sized for {} balls, have {}; rebuilding",
            proximity.ball_count(),
            balls.len()
        );
        proximity.rebuild(balls);
    }

    report.merge(&process_collisions(balls, proximity, arena));
    report
}

/// Positional sub-stepping only
pub fn move_balls(balls: &mut [Ball], elapsed: f32, quantum: f32) -> FrameReport {
    let mut report = FrameReport::default();

    if !elapsed.is_finite() || elapsed < 0.0 {
        log::warn!("Ignoring invalid frame time {elapsed}");
        return report;
    }
    if !(quantum.is_finite() && quantum > 0.0) {
        log::warn!("Ignoring frame with invalid time quantum {quantum}");
        return report;
    }

    if elapsed < quantum {
        for ball in balls.iter_mut() {
            ball.advance(elapsed);
        }
        report.substeps = 1;
        report.simulated_time = elapsed;
        return report;
    }

    // Whole quanta only, counted in f64 so huge frames still terminate
    let steps = (f64::from(elapsed) / f64::from(quantum)).floor() as u64;
    for _ in 0..steps {
        for ball in balls.iter_mut() {
            ball.advance(quantum);
        }
    }
    report.substeps = u32::try_from(steps).unwrap_or(u32::MAX);
    report.simulated_time = (steps as f64 * f64::from(quantum)) as f32;
    report
}

/// One broad phase -> narrow phase -> response pass over all pairs
///
/// Ball `i` is checked against the walls right after its last pair
/// `(i, j > i)`, so every ball's final direction this frame has seen the
/// walls. A pair that touched is skipped for the next
/// [`COOLDOWN_FRAMES`](super::proximity::COOLDOWN_FRAMES) frames.
pub fn process_collisions(
    balls: &mut [Ball],
    proximity: &mut ProximityMatrix,
    arena: Vec2,
) -> FrameReport {
    let mut report = FrameReport::default();
    let n = balls.len();

    for i in 0..n {
        for j in (i + 1)..n {
            let (head, tail) = balls.split_at_mut(j);
            let (a, b) = (&mut head[i], &mut tail[0]);

            match proximity.step_pair(i, j, a, b) {
                Some(units) if units <= CONTACT && balls_interact(a, b) => {}
                _ => continue,
            }

            report.contacts += 1;
            match resolve_ball_collision(a, b) {
                ContactOutcome::Resolved => {
                    report.resolved += 1;
                    log::trace!("Resolved contact {i}-{j}");
                }
                ContactOutcome::Separating => {}
                ContactOutcome::Degenerate => {
                    report.degenerate += 1;
                    log::warn!("Balls {i} and {j} share a center, contact skipped");
                }
            }
            proximity.start_cooldown(i, j);
        }

        if bounce_off_walls(&mut balls[i], arena) {
            report.wall_bounces += 1;
        }
    }

    report
}
