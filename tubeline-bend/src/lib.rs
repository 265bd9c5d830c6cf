//! Bend-count estimation (§4.4).
//!
//! Three independent sub-methods run over the same ordered sample of
//! vertices: curvature stencils, direction-change stencils, and a cheap
//! topology-only complexity heuristic. The top two by confidence are
//! blended into a weighted average, then a slenderness guard clamps
//! implausible counts on very long, thin parts where curvature noise
//! tends to overcount bends that aren't there.

#![cfg_attr(not(debug_assertions), deny(warnings))]
#![deny(clippy::all, rust_2018_idioms)]

mod complexity;
mod curvature;
mod direction_change;
mod sampling;
mod slenderness;

use tubeline_mesh::MeshSet;

/// One sub-method's raw bend count and confidence.
#[derive(Clone, Copy, Debug, PartialEq)]
struct MethodResult {
    bends: u32,
    confidence: f64,
}

/// The blended bend/cut estimate for a decoded part.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BendResult {
    pub bends: u32,
    pub confidence: f64,
    pub cuts: u32,
}

/// Runs all three bend sub-methods, blends the top two, applies the
/// slenderness guard, and derives the cut count.
pub fn analyze(meshes: &MeshSet) -> BendResult {
    let samples = sampling::ordered_samples(meshes, 100);
    let direction_samples = sampling::ordered_samples(meshes, 50);

    let curvature = MethodResult {
        bends: curvature::bend_count(&samples),
        confidence: curvature::confidence(samples.len()),
    };
    let direction = MethodResult {
        bends: direction_change::bend_count(&direction_samples),
        confidence: direction_change::CONFIDENCE,
    };
    let complexity = MethodResult {
        bends: complexity::bend_count(meshes),
        confidence: complexity::CONFIDENCE,
    };

    let mut ranked = [curvature, direction, complexity];
    ranked.sort_by(|a, b| b.confidence.partial_cmp(&a.confidence).unwrap());
    let (top, second) = (ranked[0], ranked[1]);

    let weighted = (top.confidence * top.bends as f64 + second.confidence * second.bends as f64)
        / (top.confidence + second.confidence);
    let mut bends = weighted.round() as i64;
    let mut confidence = top.confidence;

    let bbox = meshes.bounding_box();
    let guarded = slenderness::guard(
        bbox,
        bends,
        top.bends as i64,
        curvature.bends as i64,
        direction.bends as i64,
    );
    bends = guarded.bends;
    if guarded.confidence_capped {
        confidence = confidence.min(0.6);
    }

    let bends = bends.clamp(0, 20) as u32;
    let cuts = derive_cuts(bends);

    BendResult { bends, confidence, cuts }
}

fn derive_cuts(bends: u32) -> u32 {
    2 + if bends > 3 { bends / 3 } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tubeline_core::Point3;
    use tubeline_mesh::TriangleMesh;

    #[test]
    fn straight_rod_reports_no_bends() {
        let positions: Vec<Point3> = (0..200)
            .map(|i| Point3::new(i as f64 * 0.5, 0.0, 0.0))
            .collect();
        let meshes = MeshSet::new(vec![TriangleMesh::from_positions(positions)]).unwrap();
        let result = analyze(&meshes);
        assert_eq!(result.bends, 0);
        assert_eq!(result.cuts, 2);
    }

    #[test]
    fn cuts_add_a_third_for_every_three_bends_past_three() {
        assert_eq!(derive_cuts(0), 2);
        assert_eq!(derive_cuts(3), 2);
        assert_eq!(derive_cuts(4), 3);
        assert_eq!(derive_cuts(6), 4);
    }

    #[test]
    fn u_bend_reports_roughly_two_bends() {
        let mut positions = Vec::new();
        for i in 0..60 {
            positions.push(Point3::new(i as f64, 0.0, 0.0));
        }
        for i in 1..30 {
            let theta = std::f64::consts::PI * i as f64 / 29.0;
            positions.push(Point3::new(59.0 + 10.0 * theta.sin(), 10.0 - 10.0 * theta.cos(), 0.0));
        }
        for i in 1..60 {
            positions.push(Point3::new(59.0 - i as f64, 20.0, 0.0));
        }
        let meshes = MeshSet::new(vec![TriangleMesh::from_positions(positions)]).unwrap();
        let result = analyze(&meshes);
        assert!(result.bends <= 4);
    }
}
