use crate::TriangleMesh;
use tubeline_core::Vector3;
use cgmath::InnerSpace;

/// Computes per-vertex normals by averaging adjacent triangle face normals.
///
/// Mirrors the invariant in the data model: normals, when absent, are
/// derived this way rather than left unset, so downstream consumers that
/// expect a normal per vertex never have to special-case missing data.
pub(crate) fn ensure_normals(mesh: &mut TriangleMesh) {
    if !mesh.normals.is_empty() || mesh.indices.is_empty() {
        return;
    }
    let mut accum = vec![Vector3::new(0.0, 0.0, 0.0); mesh.positions.len()];
    for face in &mesh.indices {
        let [a, b, c] = *face;
        let (pa, pb, pc) = (mesh.positions[a], mesh.positions[b], mesh.positions[c]);
        let normal = (pb - pa).cross(pc - pa);
        if normal.magnitude2() == 0.0 {
            continue;
        }
        accum[a] += normal;
        accum[b] += normal;
        accum[c] += normal;
    }
    let normals = accum
        .into_iter()
        .map(|n| if n.magnitude2() > 0.0 { n.normalize() } else { Vector3::new(0.0, 0.0, 1.0) })
        .collect();
    mesh.set_normals(normals);
}
