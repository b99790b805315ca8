//! Closed real intervals.
//!
//! Used to bound scalar values, typically color channels before they are
//! quantized, and to express range checks on camera parameters.

/// Closed interval [min, max].
///
/// `min <= max` is assumed but not enforced. An interval built with
/// `min > max` is empty; [`Interval::clamp`] still answers from the stored
/// bounds without panicking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    min: f32,
    max: f32,
}

impl Interval {
    /// Empty interval (min > max), contains nothing.
    pub const EMPTY: Interval = Interval {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };

    /// Universe interval, contains every finite and infinite value.
    pub const UNIVERSE: Interval = Interval {
        min: f32::NEG_INFINITY,
        max: f32::INFINITY,
    };

    /// Create a new interval with given min and max values
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Lower bound.
    pub fn min(&self) -> f32 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Width of the interval. Negative for an empty interval.
    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    /// Check if the interval contains the given value (inclusive bounds)
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Check if the interval surrounds the given value (exclusive bounds)
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Clamp `x` into `[min, max]`.
    ///
    /// Values below `min` return `min`, values above `max` return `max`,
    /// everything else is returned unchanged. `NaN` compares false against
    /// both bounds and therefore comes back as `NaN`. The lower bound is tested
    /// first, so on an empty interval a value below `min` yields `min`.
    ///
    /// Unlike [`f32::clamp`] this never panics on inverted or `NaN` bounds.
    pub fn clamp(&self, x: f32) -> f32 {
        if x < self.min {
            return self.min;
        }
        if x > self.max {
            return self.max;
        }
        x
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::EMPTY
    }
}
