//! Longitudinal placement windows inside a segment.

use rand::Rng;

/// Closed z-interval `[lo, hi]` a placement may use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZSpan {
    pub lo: f32,
    pub hi: f32,
}

impl ZSpan {
    /// The part of `[anchor_z, anchor_z + length]` at least `margin` away
    /// from both ends.
    ///
    /// A margin that leaves nothing collapses the span onto its start
    /// (clamped into the segment) rather than inverting it.
    pub fn within(anchor_z: f32, length: f32, margin: f32) -> Self {
        let length = length.max(0.0);
        let lo = anchor_z + margin.clamp(0.0, length);
        let hi = anchor_z + length - margin;
        if hi > lo {
            Self { lo, hi }
        } else {
            Self { lo, hi: lo }
        }
    }

    pub fn is_point(&self) -> bool {
        self.hi <= self.lo
    }

    /// Uniform draw from the span; a collapsed span always yields `lo`.
    pub fn sample(&self, rng: &mut impl Rng) -> f32 {
        if self.is_point() {
            self.lo
        } else {
            rng.gen_range(self.lo..=self.hi)
        }
    }
}
