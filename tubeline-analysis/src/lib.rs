//! Output assembler (§4.5): runs the full pipeline over a decoded file and
//! packages the result as a single [`AnalysisResult`].
//!
//! This crate performs no I/O of its own; it wires together
//! [`tubeline_decode`], [`tubeline_units`], [`tubeline_length`], and
//! [`tubeline_bend`] and is a pure function of the bytes it is given.

#![cfg_attr(not(debug_assertions), deny(warnings))]
#![deny(clippy::all, rust_2018_idioms)]

use serde::Serialize;
use tubeline_core::{BoundingBox, Vector3};

pub use tubeline_decode::Error;

/// A 3D vector in the file's original units, as reported in
/// [`AnalysisResult::bounding_box`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<Vector3> for Vec3 {
    fn from(v: Vector3) -> Self {
        Vec3 { x: v.x, y: v.y, z: v.z }
    }
}

impl From<tubeline_core::Point3> for Vec3 {
    fn from(p: tubeline_core::Point3) -> Self {
        Vec3 { x: p.x, y: p.y, z: p.z }
    }
}

/// The geometry's bounding box, reported in the file's original
/// (pre-conversion) units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BoundingBoxReport {
    pub min: Vec3,
    pub max: Vec3,
    pub size: f64,
}

impl From<&BoundingBox> for BoundingBoxReport {
    fn from(bbox: &BoundingBox) -> Self {
        BoundingBoxReport {
            min: bbox.min().into(),
            max: bbox.max().into(),
            size: bbox.size(),
        }
    }
}

/// The analyzer's full output contract (§3).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub total_length_mm: f64,
    pub estimated_bends: u32,
    pub estimated_cuts: u32,
    pub units: &'static str,
    pub original_units: &'static str,
    pub unit_confidence: f64,
    pub length_method: &'static str,
    pub length_confidence: f64,
    pub bounding_box: BoundingBoxReport,
}

/// Runs the full pipeline on `bytes` (the contents of `filename`) and
/// assembles an [`AnalysisResult`]. Only the decoder adapter's fatal
/// errors (`UnsupportedFormat`, `DecodeFailure`, `EmptyGeometry`)
/// propagate; every estimator past that point degrades gracefully instead
/// of failing the whole request.
pub fn analyze(filename: &str, bytes: &[u8]) -> Result<AnalysisResult, Error> {
    let decoded = tubeline_decode::decode(filename, bytes)?;
    let bbox = decoded.meshes.bounding_box();
    let max_dimension = bbox.size();

    let resolved = tubeline_units::resolve(&decoded.metadata, &decoded.raw_prefix, max_dimension);
    let (unit, unit_confidence) = tubeline_units::validate(resolved.unit, max_dimension);

    let length = tubeline_length::estimate(&decoded.meshes);
    let total_length_mm = length.length * unit.factor_to_mm();

    let bend = tubeline_bend::analyze(&decoded.meshes);

    log::debug!(
        "{filename}: length={total_length_mm:.2}mm via {} (confidence {:.2}), bends={}, unit={} (confidence {:.2})",
        length.method.as_str(),
        length.confidence,
        bend.bends,
        unit.name(),
        unit_confidence,
    );

    Ok(AnalysisResult {
        total_length_mm,
        estimated_bends: bend.bends,
        estimated_cuts: bend.cuts,
        units: "millimeter",
        original_units: unit.name(),
        unit_confidence,
        length_method: length.method.as_str(),
        length_confidence: length.confidence,
        bounding_box: BoundingBoxReport::from(&bbox),
    })
}
