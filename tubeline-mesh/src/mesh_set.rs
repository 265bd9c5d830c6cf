use crate::{Error, TriangleMesh};
use tubeline_core::BoundingBox;

/// Ordered sequence of meshes decoded from a single file. Owns its meshes
/// exclusively for the lifetime of the analysis; nothing outside the
/// pipeline holds a reference into it.
#[derive(Clone, Debug, Default)]
pub struct MeshSet {
    meshes: Vec<TriangleMesh>,
}

impl MeshSet {
    /// Wraps a list of meshes, requiring at least one non-empty mesh.
    pub fn new(meshes: Vec<TriangleMesh>) -> Result<Self, Error> {
        let total_vertices: usize = meshes.iter().map(TriangleMesh::vertex_count).sum();
        if meshes.is_empty() || total_vertices == 0 {
            return Err(Error::EmptyGeometry);
        }
        Ok(MeshSet { meshes })
    }

    /// The decoded meshes, in file order.
    pub fn meshes(&self) -> &[TriangleMesh] { &self.meshes }

    /// Total vertex count across all meshes.
    pub fn total_vertices(&self) -> usize {
        self.meshes.iter().map(TriangleMesh::vertex_count).sum()
    }

    /// Bounding box of every mesh combined.
    pub fn bounding_box(&self) -> BoundingBox {
        self.meshes
            .iter()
            .flat_map(|m| m.positions().iter())
            .collect()
    }

    /// Computes missing per-vertex normals on every mesh in place.
    pub fn ensure_normals(&mut self) {
        self.meshes.iter_mut().for_each(TriangleMesh::ensure_normals);
    }

    /// Concatenated position buffer across all meshes, for algorithms that
    /// sample the whole part's surface rather than one mesh at a time.
    pub fn all_positions(&self) -> impl Iterator<Item = &tubeline_core::Point3> {
        self.meshes.iter().flat_map(|m| m.positions().iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tubeline_core::Point3;

    #[test]
    fn rejects_empty_sets() {
        assert!(matches!(MeshSet::new(vec![]), Err(Error::EmptyGeometry)));
        assert!(matches!(
            MeshSet::new(vec![TriangleMesh::from_positions(vec![])]),
            Err(Error::EmptyGeometry)
        ));
    }

    #[test]
    fn accepts_single_mesh() {
        let set = MeshSet::new(vec![TriangleMesh::from_positions(vec![Point3::new(
            0.0, 0.0, 0.0,
        )])])
        .unwrap();
        assert_eq!(set.total_vertices(), 1);
    }
}
