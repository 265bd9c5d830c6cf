//! Bounding-box fallback (§4.3.4): the estimator that can always produce
//! *something*, at the cost of the lowest confidence of the four.

use tubeline_mesh::MeshSet;

use crate::Estimate;

pub fn estimate(meshes: &MeshSet) -> Option<Estimate> {
    let bbox = meshes.bounding_box();
    let (longest, dy, dz) = bbox.sorted_dimensions();
    if !(longest > 0.0) {
        return None;
    }
    let center = (dy + dz) / 2.0;

    if longest > 3.0 * center {
        return Some(Estimate {
            length: longest,
            confidence: 0.5,
        });
    }

    let length = longest * (longest / center).sqrt().max(1.0);
    Some(Estimate {
        length,
        confidence: 0.2,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tubeline_core::Point3;
    use tubeline_mesh::TriangleMesh;

    #[test]
    fn slender_box_reports_longest_axis_directly() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(100.0, 1.0, 1.0),
        ];
        let meshes = MeshSet::new(vec![TriangleMesh::from_positions(positions)]).unwrap();
        let estimate = estimate(&meshes).unwrap();
        assert_eq!(estimate.length, 100.0);
        assert_eq!(estimate.confidence, 0.5);
    }

    #[test]
    fn cube_like_box_applies_the_stretch_correction() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 9.0, 9.0),
        ];
        let meshes = MeshSet::new(vec![TriangleMesh::from_positions(positions)]).unwrap();
        let estimate = estimate(&meshes).unwrap();
        assert!(estimate.length >= 10.0);
        assert_eq!(estimate.confidence, 0.2);
    }

    #[test]
    fn zero_sized_box_yields_no_estimate() {
        let positions = vec![Point3::new(1.0, 1.0, 1.0); 3];
        let meshes = MeshSet::new(vec![TriangleMesh::from_positions(positions)]).unwrap();
        assert!(estimate(&meshes).is_none());
    }
}
