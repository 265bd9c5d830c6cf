//! Path sampling (§4.3.3): on a single-mesh input, pick 50 positions
//! evenly indexed across the position buffer and sum consecutive
//! distances. Lossy, but some tessellators emit vertices in an order that
//! already traces the part's centerline, and this estimator occasionally
//! captures that for free.

use tubeline_mesh::MeshSet;

use crate::Estimate;

const SAMPLE_COUNT: usize = 50;
const MIN_LENGTH_RATIO: f64 = 0.8;
const CONFIDENCE: f64 = 0.6;

pub fn estimate(meshes: &MeshSet) -> Option<Estimate> {
    if meshes.meshes().len() != 1 {
        return None;
    }
    let mesh = &meshes.meshes()[0];
    let positions = mesh.positions();
    if positions.len() < 2 {
        return None;
    }

    let count = SAMPLE_COUNT.min(positions.len());
    let indices: Vec<usize> = if count == 1 {
        vec![0]
    } else {
        (0..count)
            .map(|i| i * (positions.len() - 1) / (count - 1))
            .collect()
    };

    let length: f64 = indices
        .windows(2)
        .map(|w| {
            let a = positions[w[0]];
            let b = positions[w[1]];
            ((a.x - b.x).powi(2) + (a.y - b.y).powi(2) + (a.z - b.z).powi(2)).sqrt()
        })
        .sum();

    let diagonal = mesh.bounding_box().diameter();
    if !(length > MIN_LENGTH_RATIO * diagonal) {
        return None;
    }

    Some(Estimate {
        length,
        confidence: CONFIDENCE,
    })
}
