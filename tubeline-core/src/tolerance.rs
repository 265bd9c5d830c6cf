use cgmath::AbsDiffEq;
use std::fmt::Debug;

/// General numerical tolerance used for "is this effectively zero / equal"
/// comparisons across the pipeline.
pub const TOLERANCE: f64 = 1.0e-6;

/// Defines a tolerance for the whole package.
pub trait Tolerance: AbsDiffEq<Epsilon = f64> + Debug {
    /// The "distance" between `self` and `other` is less than [`TOLERANCE`].
    fn near(&self, other: &Self) -> bool { self.abs_diff_eq(other, TOLERANCE) }
}

impl<T: AbsDiffEq<Epsilon = f64> + Debug> Tolerance for T {}
