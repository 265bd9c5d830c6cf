//! Complexity heuristic (§4.4): a topology-only fallback that never looks
//! at vertex positions, just the sheer size of the mesh. Useful when the
//! other two methods are skipped or badly disagree, at the cost of being
//! the least trustworthy of the three.

use tubeline_mesh::MeshSet;

pub(crate) const CONFIDENCE: f64 = 0.3;
const SCORE_THRESHOLD: f64 = 8.0;
const SCORE_DIVISOR: f64 = 1.5;
const MAX_BENDS: u32 = 10;

pub(crate) fn bend_count(meshes: &MeshSet) -> u32 {
    let vertices: usize = meshes.meshes().iter().map(|m| m.vertex_count()).sum();
    let triangles: usize = meshes.meshes().iter().map(|m| m.triangle_count()).sum();

    let score = (vertices.max(1) as f64).ln() + ((triangles + 1) as f64).ln();
    if score > SCORE_THRESHOLD {
        (((score - SCORE_THRESHOLD) / SCORE_DIVISOR).floor() as u32).min(MAX_BENDS)
    } else {
        0
    }
}
