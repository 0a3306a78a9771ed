//! Deterministic simulation module
//!
//! Everything that moves balls lives here. No rendering, no timing, no
//! platform dependencies: callers hand in the elapsed frame time.
//!
//! Per frame: [`advance`] sub-steps positions, then [`process_collisions`]
//! walks every pair through the proximity matrix (broad phase),
//! [`balls_interact`] (narrow phase) and [`resolve_ball_collision`], and
//! reflects each ball off the walls.

pub mod ball;
pub mod collision;
pub mod proximity;
pub mod tick;
pub mod world;

pub use ball::{Ball, BallSnapshot};
pub use collision::{ContactOutcome, balls_interact, bounce_off_walls, resolve_ball_collision};
pub use proximity::{COOLDOWN, COOLDOWN_FRAMES, CONTACT, NEAR_CONTACT, ProximityMatrix, estimate, pair_index};
pub use tick::{FrameReport, advance, move_balls, process_collisions};
pub use world::World;
