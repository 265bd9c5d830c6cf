//! Centerline length estimation.
//!
//! Four independent estimators run over a decoded [`tubeline_mesh::MeshSet`]:
//! 3D skeletonization, PCA slicing, path sampling, and a bounding-box
//! fallback. Each is expressed as a function returning `Option<Estimate>`
//! rather than a `Result`: a missing estimate (too few samples, a degenerate
//! axis, too few medial-axis points) is an expected, non-fatal outcome, and
//! the selector simply ignores it. The only truly exceptional state is "no
//! estimator produced anything", which [`estimate`] reports as
//! [`LengthMethod::None`] with zero length.

#![cfg_attr(not(debug_assertions), deny(warnings))]
#![deny(clippy::all, rust_2018_idioms)]

mod bbox_fallback;
mod integrators;
mod path_sampling;
mod pca;
mod selection;
mod skeleton;

use tubeline_mesh::MeshSet;

/// A single estimator's length and confidence, prior to cross-validation
/// adjustments applied at selection time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Estimate {
    pub length: f64,
    pub confidence: f64,
}

/// Which estimator ultimately produced the reported length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LengthMethod {
    Skeletonization,
    PcaSlicing,
    PathCalculation,
    BoundingBox,
    None,
}

impl LengthMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            LengthMethod::Skeletonization => "3D Skeletonization",
            LengthMethod::PcaSlicing => "PCA Slicing",
            LengthMethod::PathCalculation => "Path Calculation",
            LengthMethod::BoundingBox => "Bounding Box",
            LengthMethod::None => "none",
        }
    }
}

/// The winning estimator's length (in the mesh's original units, not
/// millimeters) plus its post-cross-validation confidence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LengthResult {
    pub length: f64,
    pub method: LengthMethod,
    pub confidence: f64,
}

/// Runs all four length estimators and selects the best result.
pub fn estimate(meshes: &MeshSet) -> LengthResult {
    let candidates = [
        (LengthMethod::Skeletonization, skeleton::estimate(meshes)),
        (LengthMethod::PcaSlicing, pca::estimate(meshes)),
        (LengthMethod::PathCalculation, path_sampling::estimate(meshes)),
        (LengthMethod::BoundingBox, bbox_fallback::estimate(meshes)),
    ];
    selection::select(&candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tubeline_core::Point3;
    use tubeline_mesh::TriangleMesh;

    #[test]
    fn straight_rod_along_x_is_estimated_within_tolerance() {
        let positions: Vec<Point3> = (0..200)
            .map(|i| Point3::new(i as f64 * 0.5, 0.0, 0.0))
            .collect();
        let meshes = MeshSet::new(vec![TriangleMesh::from_positions(positions)]).unwrap();
        let result = estimate(&meshes);
        assert_ne!(result.method, LengthMethod::None);
        assert!((result.length - 99.5).abs() / 99.5 <= 0.05);
    }

    #[test]
    fn degenerate_point_cloud_falls_back_to_bounding_box_or_none() {
        let meshes = MeshSet::new(vec![TriangleMesh::from_positions(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
        ])])
        .unwrap();
        let result = estimate(&meshes);
        assert_eq!(result.length, 0.0);
        assert_eq!(result.method, LengthMethod::None);
    }
}
