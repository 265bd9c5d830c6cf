//! Shared linear-algebra primitives: 3D points/vectors, bounding boxes, and a
//! tolerance convention used across the decode, unit-resolution, length, and
//! bend stages of the tube analyzer pipeline.

#![cfg_attr(not(debug_assertions), deny(warnings))]
#![deny(clippy::all, rust_2018_idioms)]

pub use cgmath::prelude::*;

/// `f64`-scalar point and vector redefinitions, matching the rest of the
/// pipeline's coordinate system (original file units, not display units).
pub type Point3 = cgmath::Point3<f64>;
/// See [`Point3`].
pub type Vector3 = cgmath::Vector3<f64>;

pub mod bounding_box;
pub mod tolerance;

pub use bounding_box::BoundingBox;
pub use tolerance::{Tolerance, TOLERANCE};
