use tubeline_core::Point3;
use tubeline_mesh::MeshSet;

/// Evenly indexed sample of up to `count` points across every mesh's
/// concatenated position buffer, in file order. Shared by the curvature
/// and direction-change methods, which only differ in how many points
/// they ask for and how they interpret the stencil.
pub(crate) fn ordered_samples(meshes: &MeshSet, count: usize) -> Vec<Point3> {
    let all: Vec<Point3> = meshes.all_positions().copied().collect();
    if all.len() <= count {
        return all;
    }
    let n = count.max(1);
    (0..n).map(|i| all[i * (all.len() - 1) / (n - 1).max(1)]).collect()
}
