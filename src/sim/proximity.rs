//! Broad phase: per-pair proximity estimates
//!
//! Each unordered pair `(i, j)` stores a coarse count of "radius units"
//! (`2 * base_radius` each) left before the two balls can touch. Every frame
//! the count drops by one; only when it falls under [`NEAR_CONTACT`] is the
//! real distance measured again. The count assumes a pair closes at most one
//! unit per frame; frames much longer than the time quantum break that and
//! may let a contact slip by.
//!
//! After a confirmed contact the pair is parked at [`COOLDOWN`] and left
//! alone for [`COOLDOWN_FRAMES`] frames: the value keeps decaying but is
//! neither re-measured nor handed to the narrow phase, so the two balls get
//! time to move apart before they can be resolved again.
//!
//! Storage is a flat upper triangle, `n * (n - 1) / 2` entries.

use serde::{Deserialize, Serialize};

use super::ball::Ball;

/// Below this the pair is re-measured
pub const NEAR_CONTACT: i32 = 3;
/// At or below this the exact narrow-phase test runs
pub const CONTACT: i32 = 1;
/// Value written after a confirmed contact so the pair can separate
pub const COOLDOWN: i32 = 3;
/// Frames after a contact during which the pair is skipped
pub const COOLDOWN_FRAMES: u8 = (COOLDOWN - CONTACT) as u8;

/// Upper-triangular matrix of proximity estimates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProximityMatrix {
    estimates: Vec<i32>,
    /// Frames of cooldown left per pair, same layout as `estimates`
    cooling: Vec<u8>,
    count: usize,
    distance_unit: f32,
}

/// Flat slot of pair `(i, j)`, `i < j < n`
#[inline]
pub fn pair_index(i: usize, j: usize, n: usize) -> usize {
    debug_assert!(i < j && j < n, "pair ({i}, {j}) out of range for {n} balls");
    i * (2 * n - i - 1) / 2 + (j - i - 1)
}

/// Number of unordered pairs among `n` balls
#[inline]
pub fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Gap between two balls in radius units
///
/// Uses the larger of the per-axis center offsets minus both radii, so it
/// never overestimates the true gap. Truncates toward zero and may be
/// negative when the balls overlap.
pub fn estimate(a: &Ball, b: &Ball, distance_unit: f32) -> i32 {
    let offset = (a.center() - b.center()).abs();
    let gap = offset.max_element() - (a.radius + b.radius);
    (gap / distance_unit) as i32
}

impl ProximityMatrix {
    /// Build for `balls`, measuring every pair
    pub fn new(balls: &[Ball], distance_unit: f32) -> Self {
        let mut matrix = Self {
            estimates: Vec::new(),
            cooling: Vec::new(),
            count: 0,
            distance_unit,
        };
        matrix.rebuild(balls);
        matrix
    }

    /// Resize to the current population and re-measure every pair
    pub fn rebuild(&mut self, balls: &[Ball]) {
        let n = balls.len();
        self.count = n;
        self.estimates.clear();
        self.estimates.reserve_exact(pair_count(n));
        self.cooling.clear();
        self.cooling.resize(pair_count(n), 0);
        for i in 0..n {
            for j in (i + 1)..n {
                self.estimates
                    .push(estimate(&balls[i], &balls[j], self.distance_unit));
            }
        }
    }

    /// Current estimate for a pair, in either order
    pub fn get(&self, i: usize, j: usize) -> i32 {
        let (i, j) = ordered(i, j);
        self.estimates[pair_index(i, j, self.count)]
    }

    /// Overwrite a pair's estimate, cancelling any cooldown
    pub fn set(&mut self, i: usize, j: usize, value: i32) {
        let (i, j) = ordered(i, j);
        let slot = pair_index(i, j, self.count);
        self.estimates[slot] = value;
        self.cooling[slot] = 0;
    }

    /// Park a pair that just touched at [`COOLDOWN`]
    pub fn start_cooldown(&mut self, i: usize, j: usize) {
        let (i, j) = ordered(i, j);
        let slot = pair_index(i, j, self.count);
        self.estimates[slot] = COOLDOWN;
        self.cooling[slot] = COOLDOWN_FRAMES;
    }

    /// Whether a pair is still inside its post-contact window
    pub fn is_cooling(&self, i: usize, j: usize) -> bool {
        let (i, j) = ordered(i, j);
        self.cooling[pair_index(i, j, self.count)] > 0
    }

    /// One frame of decay for pair `(i, j)`, re-measuring when near contact
    ///
    /// Returns the estimate left in the slot, or `None` while the pair is
    /// cooling down and must not reach the narrow phase.
    pub fn step_pair(&mut self, i: usize, j: usize, a: &Ball, b: &Ball) -> Option<i32> {
        let slot = pair_index(i, j, self.count);
        let value = self.estimates[slot].saturating_sub(1);

        if self.cooling[slot] > 0 {
            self.cooling[slot] -= 1;
            self.estimates[slot] = value;
            return None;
        }

        let value = if value < NEAR_CONTACT {
            estimate(a, b, self.distance_unit)
        } else {
            value
        };
        self.estimates[slot] = value;
        Some(value)
    }

    /// Population the matrix is sized for
    pub fn ball_count(&self) -> usize {
        self.count
    }

    /// Number of stored pairs
    pub fn len(&self) -> usize {
        self.estimates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.estimates.is_empty()
    }

    pub fn distance_unit(&self) -> f32 {
        self.distance_unit
    }
}

#[inline]
fn ordered(i: usize, j: usize) -> (usize, usize) {
    if i < j { (i, j) } else { (j, i) }
}
