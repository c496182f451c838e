//! Sources for the random landing offset added to each spin.

use rand::Rng;
use rand::rngs::SmallRng;

use crate::consts::FULL_TURN_DEG;

/// Yields the random part of a spin's target angle.
pub trait OffsetSource {
    /// Next offset in degrees, in `[0, 360)`.
    fn next_offset(&mut self) -> f64;
}

impl OffsetSource for SmallRng {
    fn next_offset(&mut self) -> f64 {
        self.random_range(0.0..FULL_TURN_DEG)
    }
}

/// Always returns the same offset. Used for reproducible spins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedOffset(pub f64);

impl OffsetSource for FixedOffset {
    fn next_offset(&mut self) -> f64 {
        self.0
    }
}
