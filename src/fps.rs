//! Frame rate smoothing
//!
//! Owned by the frame loop, not by the simulation. Nothing in `sim` reads it.

use crate::consts::FPS_WINDOW;

/// FPS counter averaging the last [`FPS_WINDOW`] frames
pub type FpsCounter = MovingAverage<FPS_WINDOW>;

/// Running mean over the last `N` samples
///
/// Samples live in a ring buffer; the sum is updated incrementally so
/// `push` and `average` are both O(1).
#[derive(Debug, Clone)]
pub struct MovingAverage<const N: usize> {
    samples: [f32; N],
    next: usize,
    count: usize,
    sum: f32,
}

impl<const N: usize> Default for MovingAverage<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> MovingAverage<N> {
    pub fn new() -> Self {
        Self {
            samples: [0.0; N],
            next: 0,
            count: 0,
            sum: 0.0,
        }
    }

    /// Add a sample, evicting the oldest once full
    pub fn push(&mut self, value: f32) {
        if N == 0 {
            return;
        }
        self.sum = self.sum - self.samples[self.next] + value;
        self.samples[self.next] = value;
        self.next = (self.next + 1) % N;
        if self.count < N {
            self.count += 1;
        }
    }

    /// Mean of the stored samples, `None` before the first push
    pub fn average(&self) -> Option<f32> {
        (self.count > 0).then(|| self.sum / self.count as f32)
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }
}
