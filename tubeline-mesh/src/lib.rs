//! Triangle mesh and mesh-set data structures.
//!
//! A [`TriangleMesh`] holds a position buffer plus optional triangle indices
//! and per-vertex normals, following the loosely-typed record the decoder
//! adapter's underlying tessellator hands back (`position.array` required,
//! `normal.array`/`index.array` optional). A [`MeshSet`] is the ordered,
//! exclusively-owned collection of meshes decoded from one input file.

#![cfg_attr(not(debug_assertions), deny(warnings))]
#![deny(clippy::all, rust_2018_idioms)]

use serde::{Deserialize, Serialize};
use tubeline_core::{BoundingBox, Point3, Vector3};

pub mod errors;
mod mesh_set;
mod normals;

pub use errors::Error;
pub use mesh_set::MeshSet;

/// A single triangulated surface, or a line-strip "mesh" with no faces
/// (as synthesized from DXF line/polyline entities).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    /// Vertex positions, in the file's authoring unit.
    positions: Vec<Point3>,
    /// Per-vertex normals. Empty until [`TriangleMesh::ensure_normals`] runs,
    /// or populated directly from the source file.
    normals: Vec<Vector3>,
    /// Triangle vertex index triples into `positions`/`normals`. Empty for
    /// line-strip meshes (no faces).
    indices: Vec<[usize; 3]>,
}

impl TriangleMesh {
    /// Builds a mesh from a required position buffer and optional indices/normals.
    ///
    /// # Panics
    /// Panics if any index references a position out of bounds, or if
    /// `normals` is non-empty but shorter than `positions`.
    pub fn new(
        positions: Vec<Point3>,
        indices: Vec<[usize; 3]>,
        normals: Vec<Vector3>,
    ) -> Self {
        let n = positions.len();
        assert!(
            indices.iter().all(|f| f.iter().all(|&i| i < n)),
            "triangle index out of bounds of the position buffer"
        );
        assert!(
            normals.is_empty() || normals.len() >= n,
            "normal buffer shorter than the position buffer"
        );
        TriangleMesh {
            positions,
            normals,
            indices,
        }
    }

    /// A mesh with only positions: the common case for decoders that only
    /// scanned a vertex cloud (STEP point extraction, DXF line strips).
    pub fn from_positions(positions: Vec<Point3>) -> Self {
        TriangleMesh::new(positions, Vec::new(), Vec::new())
    }

    /// Vertex positions, in original file units.
    pub fn positions(&self) -> &[Point3] { &self.positions }

    /// Per-vertex normals, if present (see [`TriangleMesh::ensure_normals`]).
    pub fn normals(&self) -> &[Vector3] { &self.normals }

    /// Triangle index triples, empty for line-strip meshes.
    pub fn indices(&self) -> &[[usize; 3]] { &self.indices }

    /// Number of vertices in the position buffer.
    pub fn vertex_count(&self) -> usize { self.positions.len() }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize { self.indices.len() }

    /// Bounding box of the position buffer.
    pub fn bounding_box(&self) -> BoundingBox { self.positions.iter().collect() }

    /// If indices are present and normals are missing, computes per-vertex
    /// normals by averaging the face normals of adjacent triangles. A no-op
    /// for line-strip meshes (no indices) or meshes that already carry normals.
    pub fn ensure_normals(&mut self) { normals::ensure_normals(self) }

    fn set_normals(&mut self, normals: Vec<Vector3>) { self.normals = normals; }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounding_box_matches_positions() {
        let mesh = TriangleMesh::from_positions(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 2.0, 3.0),
        ]);
        let bbox = mesh.bounding_box();
        assert_eq!(bbox.min(), Point3::new(0.0, 0.0, 0.0));
        assert_eq!(bbox.max(), Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    #[should_panic]
    fn rejects_out_of_bounds_indices() {
        TriangleMesh::new(vec![Point3::new(0.0, 0.0, 0.0)], vec![[0, 1, 2]], Vec::new());
    }
}
