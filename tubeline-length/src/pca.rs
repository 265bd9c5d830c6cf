//! PCA slicing (§4.3.2): project samples onto the dominant principal axis,
//! slice into slabs along it, smooth the slab centroids, and sum their
//! consecutive distances.

use tubeline_core::{Point3, Vector3};
use tubeline_mesh::MeshSet;

use crate::Estimate;

const MAX_SAMPLES: usize = 2000;
const SLAB_COUNT: usize = 120;
const POWER_ITERATIONS: usize = 20;
const SMOOTHING_RADIUS: usize = 3;
const MIN_LENGTH_RATIO: f64 = 0.8;
const CONFIDENCE: f64 = 0.7;

type Mat3 = [[f64; 3]; 3];

pub fn estimate(meshes: &MeshSet) -> Option<Estimate> {
    let samples = sample(meshes);
    if samples.len() < 3 {
        return None;
    }

    let mean = centroid(&samples);
    let covariance = covariance_matrix(&samples, mean);
    let axis = dominant_eigenvector(covariance)?;

    let projections: Vec<f64> = samples
        .iter()
        .map(|p| dot(sub(*p, mean), axis))
        .collect();
    let min_proj = projections.iter().cloned().fold(f64::INFINITY, f64::min);
    let max_proj = projections.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let span = max_proj - min_proj;
    if !(span > 0.0) {
        return None;
    }

    let mut slabs: Vec<Vec<Point3>> = vec![Vec::new(); SLAB_COUNT];
    for (p, &proj) in samples.iter().zip(projections.iter()) {
        let mut slab = (((proj - min_proj) / span) * SLAB_COUNT as f64) as usize;
        if slab >= SLAB_COUNT {
            slab = SLAB_COUNT - 1;
        }
        slabs[slab].push(*p);
    }

    let centroids: Vec<Point3> = slabs
        .iter()
        .filter(|slab| !slab.is_empty())
        .map(|slab| centroid(slab))
        .collect();
    if centroids.len() < 2 {
        return None;
    }

    let smoothed = moving_average(&centroids, SMOOTHING_RADIUS);
    let length: f64 = smoothed.windows(2).map(|w| distance(w[0], w[1])).sum();

    let bbox = meshes.bounding_box();
    let dominant_dimension = bbox.size();
    if length < MIN_LENGTH_RATIO * dominant_dimension {
        return None;
    }

    Some(Estimate {
        length,
        confidence: CONFIDENCE,
    })
}

fn sample(meshes: &MeshSet) -> Vec<Point3> {
    let all: Vec<Point3> = meshes.all_positions().copied().collect();
    if all.len() <= MAX_SAMPLES {
        return all;
    }
    let stride = (all.len() / MAX_SAMPLES).max(1);
    all.iter().step_by(stride).copied().collect()
}

fn centroid(points: &[Point3]) -> Point3 {
    let n = points.len() as f64;
    let sum = points.iter().fold(Vector3::new(0.0, 0.0, 0.0), |acc, p| {
        acc + Vector3::new(p.x, p.y, p.z)
    });
    Point3::new(sum.x / n, sum.y / n, sum.z / n)
}

fn covariance_matrix(points: &[Point3], mean: Point3) -> Mat3 {
    let mut m = [[0.0; 3]; 3];
    for p in points {
        let d = [p.x - mean.x, p.y - mean.y, p.z - mean.z];
        for i in 0..3 {
            for j in 0..3 {
                m[i][j] += d[i] * d[j];
            }
        }
    }
    let n = points.len() as f64;
    for row in m.iter_mut() {
        for v in row.iter_mut() {
            *v /= n;
        }
    }
    m
}

/// Dominant eigenvector of a symmetric 3x3 matrix via power iteration,
/// restarting from a different seed vector if the first attempt degenerates
/// (near-zero magnitude, e.g. a perfectly spherical point cloud).
fn dominant_eigenvector(m: Mat3) -> Option<Vector3> {
    let seeds = [
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
        Vector3::new(1.0, 1.0, 1.0),
    ];
    for seed in seeds {
        if let Some(axis) = power_iterate(m, seed) {
            return Some(axis);
        }
    }
    None
}

fn power_iterate(m: Mat3, seed: Vector3) -> Option<Vector3> {
    let mut v = seed;
    for _ in 0..POWER_ITERATIONS {
        let next = apply(m, v);
        let mag = magnitude(next);
        if mag < 1e-9 {
            return None;
        }
        v = Vector3::new(next.x / mag, next.y / mag, next.z / mag);
    }
    Some(v)
}

fn apply(m: Mat3, v: Vector3) -> Vector3 {
    Vector3::new(
        m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
        m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
        m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
    )
}

fn magnitude(v: Vector3) -> f64 {
    (v.x * v.x + v.y * v.y + v.z * v.z).sqrt()
}

fn dot(a: Vector3, b: Vector3) -> f64 {
    a.x * b.x + a.y * b.y + a.z * b.z
}

fn sub(p: Point3, mean: Point3) -> Vector3 {
    Vector3::new(p.x - mean.x, p.y - mean.y, p.z - mean.z)
}

fn distance(a: Point3, b: Point3) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2) + (a.z - b.z).powi(2)).sqrt()
}

/// Length-`2*radius+1` centered moving average over an ordered point
/// sequence; endpoints average over whatever window fits within bounds.
fn moving_average(points: &[Point3], radius: usize) -> Vec<Point3> {
    points
        .iter()
        .enumerate()
        .map(|(i, _)| {
            let lo = i.saturating_sub(radius);
            let hi = (i + radius).min(points.len() - 1);
            centroid(&points[lo..=hi])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tubeline_mesh::TriangleMesh;

    #[test]
    fn straight_line_along_x_is_recovered() {
        let positions: Vec<Point3> = (0..500)
            .map(|i| Point3::new(i as f64 * 0.2, 0.0, 0.0))
            .collect();
        let meshes = MeshSet::new(vec![TriangleMesh::from_positions(positions)]).unwrap();
        let estimate = estimate(&meshes).unwrap();
        assert!((estimate.length - 99.8).abs() / 99.8 < 0.1);
        assert_eq!(estimate.confidence, CONFIDENCE);
    }

    #[test]
    fn too_few_samples_returns_none() {
        let meshes = MeshSet::new(vec![TriangleMesh::from_positions(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
        ])])
        .unwrap();
        assert!(estimate(&meshes).is_none());
    }
}
