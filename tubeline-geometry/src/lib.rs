//! A minimal knot vector and clamped B-spline curve, sufficient to back the
//! cubic B-spline arc-length approximation used by the centerline length
//! integrator. Not a general NURBS kernel: no surfaces, no rational weights,
//! no knot insertion/removal beyond what the integrator needs.

#![cfg_attr(not(debug_assertions), deny(warnings))]
#![deny(clippy::all, rust_2018_idioms)]

mod bspline;
mod knot_vec;

pub use bspline::BSplineCurve;
pub use knot_vec::KnotVec;

/// Errors constructing knot vectors or B-spline curves.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// Fewer control points than `degree + 1`; a B-spline of this degree
    /// cannot be built.
    #[error("need at least {needed} control points for degree {degree}, got {got}")]
    TooFewControlPoints {
        /// Degree requested.
        degree: usize,
        /// Control points required (`degree + 1`).
        needed: usize,
        /// Control points actually supplied.
        got: usize,
    },
}
