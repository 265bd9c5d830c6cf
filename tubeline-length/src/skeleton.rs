//! 3D skeletonization (§4.3.1): voxelize a sampled point cloud, run a
//! discrete distance transform, extract medial-axis voxels as local maxima
//! of that field, order them into a path, and integrate its arc length.

use smallvec::SmallVec;
use tubeline_core::{BoundingBox, Point3};
use tubeline_mesh::MeshSet;

use crate::{integrators, Estimate};

type Neighbors6 = SmallVec<[(usize, usize, usize); 6]>;
type Neighbors26 = SmallVec<[(usize, usize, usize); 26]>;

const TARGET_SAMPLES: usize = 3000;
const MIN_SAMPLES: usize = 50;
const VOXELS_ALONG_LONGEST_AXIS: usize = 80;
const MIN_MEDIAL_POINTS: usize = 2;

struct VoxelGrid {
    dims: (usize, usize, usize),
    origin: Point3,
    voxel_size: f64,
    occupied: Vec<bool>,
}

impl VoxelGrid {
    fn len(&self) -> usize {
        self.dims.0 * self.dims.1 * self.dims.2
    }

    fn index(&self, x: usize, y: usize, z: usize) -> usize {
        x + y * self.dims.0 + z * self.dims.0 * self.dims.1
    }

    fn voxel_of(&self, p: Point3) -> (usize, usize, usize) {
        let ix = (((p.x - self.origin.x) / self.voxel_size) as usize).min(self.dims.0 - 1);
        let iy = (((p.y - self.origin.y) / self.voxel_size) as usize).min(self.dims.1 - 1);
        let iz = (((p.z - self.origin.z) / self.voxel_size) as usize).min(self.dims.2 - 1);
        (ix, iy, iz)
    }

    fn center_of(&self, x: usize, y: usize, z: usize) -> Point3 {
        Point3::new(
            self.origin.x + (x as f64 + 0.5) * self.voxel_size,
            self.origin.y + (y as f64 + 0.5) * self.voxel_size,
            self.origin.z + (z as f64 + 0.5) * self.voxel_size,
        )
    }

    fn neighbors6(&self, x: usize, y: usize, z: usize) -> Neighbors6 {
        let mut out = Neighbors6::new();
        let (dx, dy, dz) = self.dims;
        if x > 0 { out.push((x - 1, y, z)); }
        if x + 1 < dx { out.push((x + 1, y, z)); }
        if y > 0 { out.push((x, y - 1, z)); }
        if y + 1 < dy { out.push((x, y + 1, z)); }
        if z > 0 { out.push((x, y, z - 1)); }
        if z + 1 < dz { out.push((x, y, z + 1)); }
        out
    }

    fn neighbors26(&self, x: usize, y: usize, z: usize) -> Neighbors26 {
        let mut out = Neighbors26::new();
        let (dx, dy, dz) = self.dims;
        for ox in -1i64..=1 {
            for oy in -1i64..=1 {
                for oz in -1i64..=1 {
                    if ox == 0 && oy == 0 && oz == 0 {
                        continue;
                    }
                    let nx = x as i64 + ox;
                    let ny = y as i64 + oy;
                    let nz = z as i64 + oz;
                    if nx >= 0 && ny >= 0 && nz >= 0 && (nx as usize) < dx && (ny as usize) < dy && (nz as usize) < dz {
                        out.push((nx as usize, ny as usize, nz as usize));
                    }
                }
            }
        }
        out
    }
}

/// Runs the full skeletonization pipeline. Returns `None` (estimator
/// skipped) when there are too few surface samples or too few medial-axis
/// points to form a path.
pub fn estimate(meshes: &MeshSet) -> Option<Estimate> {
    let samples = sample_surface(meshes)?;
    let grid = build_voxel_grid(&samples)?;
    let distances = distance_transform(&grid);
    let medial_voxels = extract_medial_axis(&grid, &distances)?;

    let medial_points: Vec<Point3> = medial_voxels
        .iter()
        .map(|&(x, y, z)| grid.center_of(x, y, z))
        .collect();

    let ordered = order_path(&medial_points);
    let integration = integrators::integrate(&ordered)?;

    let n = ordered.len();
    let smoothness = if n >= 3 {
        let turning_sum: f64 = turning_angles(&ordered).iter().sum();
        (1.0 - turning_sum / ((n - 2) as f64 * std::f64::consts::PI)).max(0.1)
    } else {
        1.0
    };
    let coverage = (n as f64 / (0.01 * samples.len() as f64)).min(1.0);
    let skeleton_confidence = 0.7 * smoothness + 0.3 * coverage;

    let confidence = 0.6 * skeleton_confidence + 0.4 * integration.confidence;

    Some(Estimate {
        length: integration.length,
        confidence,
    })
}

/// Uniformly strides the concatenated position buffer down to roughly
/// [`TARGET_SAMPLES`] points. Fails the estimator if fewer than
/// [`MIN_SAMPLES`] are available in total.
fn sample_surface(meshes: &MeshSet) -> Option<Vec<Point3>> {
    let all: Vec<Point3> = meshes.all_positions().copied().collect();
    if all.len() < MIN_SAMPLES {
        return None;
    }
    if all.len() <= TARGET_SAMPLES {
        return Some(all);
    }
    let stride = all.len() / TARGET_SAMPLES;
    let strided: Vec<Point3> = all.iter().step_by(stride.max(1)).copied().collect();
    if strided.len() < MIN_SAMPLES {
        Some(all)
    } else {
        Some(strided)
    }
}

fn build_voxel_grid(samples: &[Point3]) -> Option<VoxelGrid> {
    let bbox: BoundingBox = samples.iter().collect();
    if bbox.is_empty() {
        return None;
    }
    let (dx, dy, dz) = bbox.sorted_dimensions();
    let longest = dx.max(dy).max(dz);
    if !(longest > 0.0) {
        return None;
    }
    let voxel_size = longest / VOXELS_ALONG_LONGEST_AXIS as f64;
    let diag = bbox.diagonal();
    let dims = (
        ((diag.x / voxel_size).ceil() as usize).max(1),
        ((diag.y / voxel_size).ceil() as usize).max(1),
        ((diag.z / voxel_size).ceil() as usize).max(1),
    );
    let mut grid = VoxelGrid {
        dims,
        origin: bbox.min(),
        voxel_size,
        occupied: vec![false; dims.0 * dims.1 * dims.2],
    };
    for &p in samples {
        let (x, y, z) = grid.voxel_of(p);
        let idx = grid.index(x, y, z);
        grid.occupied[idx] = true;
    }
    Some(grid)
}

/// Iterative 6-connected relaxation: `d[v] = min(d[v], d[n] + 1)`, bounded
/// by `max(dim)` passes, stopping early once nothing changes.
fn distance_transform(grid: &VoxelGrid) -> Vec<f64> {
    let mut dist = vec![f64::INFINITY; grid.len()];
    for z in 0..grid.dims.2 {
        for y in 0..grid.dims.1 {
            for x in 0..grid.dims.0 {
                if grid.occupied[grid.index(x, y, z)] {
                    dist[grid.index(x, y, z)] = 0.0;
                }
            }
        }
    }

    let max_passes = grid.dims.0.max(grid.dims.1).max(grid.dims.2);
    for _ in 0..max_passes {
        let mut changed = false;
        for z in 0..grid.dims.2 {
            for y in 0..grid.dims.1 {
                for x in 0..grid.dims.0 {
                    let idx = grid.index(x, y, z);
                    let mut best = dist[idx];
                    for (nx, ny, nz) in grid.neighbors6(x, y, z) {
                        let candidate = dist[grid.index(nx, ny, nz)] + 1.0;
                        if candidate < best {
                            best = candidate;
                        }
                    }
                    if best < dist[idx] {
                        dist[idx] = best;
                        changed = true;
                    }
                }
            }
        }
        if !changed {
            break;
        }
    }
    dist
}

/// Inner voxels (distance >= 2) that are strict local maxima of the
/// distance field in their 26-neighborhood.
fn extract_medial_axis(grid: &VoxelGrid, dist: &[f64]) -> Option<Vec<(usize, usize, usize)>> {
    let mut medial = Vec::new();
    for z in 0..grid.dims.2 {
        for y in 0..grid.dims.1 {
            for x in 0..grid.dims.0 {
                let idx = grid.index(x, y, z);
                let d = dist[idx];
                if d < 2.0 || !d.is_finite() {
                    continue;
                }
                let is_local_max = grid
                    .neighbors26(x, y, z)
                    .iter()
                    .all(|&(nx, ny, nz)| dist[grid.index(nx, ny, nz)] < d);
                if is_local_max {
                    medial.push((x, y, z));
                }
            }
        }
    }
    if medial.len() < MIN_MEDIAL_POINTS {
        None
    } else {
        Some(medial)
    }
}

/// Mean nearest-neighbor spacing among up to 100 of `points`.
fn mean_spacing(points: &[Point3]) -> f64 {
    let subset_len = points.len().min(100);
    let subset = &points[..subset_len];
    let mut total = 0.0;
    for (i, &p) in subset.iter().enumerate() {
        let nearest = points
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .map(|(_, &q)| distance(p, q))
            .fold(f64::INFINITY, f64::min);
        if nearest.is_finite() {
            total += nearest;
        }
    }
    total / subset_len as f64
}

/// Orders medial-axis points into a single path: find (or approximate)
/// two endpoints, then greedily walk from one to the nearest unvisited
/// point until every point is consumed.
fn order_path(points: &[Point3]) -> Vec<Point3> {
    if points.len() < 2 {
        return points.to_vec();
    }
    let s = mean_spacing(points);
    let threshold = 2.0 * s;

    let endpoints: Vec<usize> = points
        .iter()
        .enumerate()
        .filter(|&(i, &p)| {
            let neighbor_count = points
                .iter()
                .enumerate()
                .filter(|&(j, &q)| j != i && distance(p, q) <= threshold)
                .count();
            neighbor_count <= 1
        })
        .map(|(i, _)| i)
        .collect();

    let start = if endpoints.len() >= 2 {
        endpoints[0]
    } else {
        farthest_pair(points).0
    };

    let mut visited = vec![false; points.len()];
    let mut order = Vec::with_capacity(points.len());
    let mut current = start;
    visited[current] = true;
    order.push(current);

    for _ in 1..points.len() {
        let next = points
            .iter()
            .enumerate()
            .filter(|&(j, _)| !visited[j])
            .min_by(|(_, a), (_, b)| {
                distance(points[current], **a)
                    .partial_cmp(&distance(points[current], **b))
                    .unwrap()
            })
            .map(|(j, _)| j);
        match next {
            Some(j) => {
                visited[j] = true;
                order.push(j);
                current = j;
            }
            None => break,
        }
    }

    order.into_iter().map(|i| points[i]).collect()
}

fn farthest_pair(points: &[Point3]) -> (usize, usize) {
    let mut best = (0, 0);
    let mut best_dist = -1.0;
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            let d = distance(points[i], points[j]);
            if d > best_dist {
                best_dist = d;
                best = (i, j);
            }
        }
    }
    best
}

fn turning_angles(points: &[Point3]) -> Vec<f64> {
    let mut angles = Vec::with_capacity(points.len().saturating_sub(2));
    for i in 1..points.len() - 1 {
        let d1 = sub(points[i], points[i - 1]);
        let d2 = sub(points[i + 1], points[i]);
        angles.push(angle_between(d1, d2));
    }
    angles
}

fn sub(a: Point3, b: Point3) -> Point3 {
    Point3::new(a.x - b.x, a.y - b.y, a.z - b.z)
}

fn angle_between(a: Point3, b: Point3) -> f64 {
    let dot = a.x * b.x + a.y * b.y + a.z * b.z;
    let mag_a = (a.x * a.x + a.y * a.y + a.z * a.z).sqrt();
    let mag_b = (b.x * b.x + b.y * b.y + b.z * b.z).sqrt();
    if mag_a < f64::EPSILON || mag_b < f64::EPSILON {
        return 0.0;
    }
    (dot / (mag_a * mag_b)).clamp(-1.0, 1.0).acos()
}

fn distance(a: Point3, b: Point3) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2) + (a.z - b.z).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tubeline_mesh::TriangleMesh;

    #[test]
    fn too_few_samples_skips_the_estimator() {
        let positions = vec![Point3::new(0.0, 0.0, 0.0); 10];
        let meshes = MeshSet::new(vec![TriangleMesh::from_positions(positions)]).unwrap();
        assert!(estimate(&meshes).is_none());
    }

    #[test]
    fn straight_tube_shell_yields_a_reasonable_length() {
        // A hollow cylindrical shell of radius 2 along the x axis, long
        // enough to voxelize into a real medial line.
        let mut positions = Vec::new();
        for i in 0..120 {
            let x = i as f64 * 1.0;
            for k in 0..8 {
                let theta = (k as f64) * std::f64::consts::TAU / 8.0;
                positions.push(Point3::new(x, 2.0 * theta.cos(), 2.0 * theta.sin()));
            }
        }
        let meshes = MeshSet::new(vec![TriangleMesh::from_positions(positions)]).unwrap();
        if let Some(estimate) = estimate(&meshes) {
            assert!(estimate.length > 0.0);
            assert!(estimate.confidence >= 0.0 && estimate.confidence <= 1.0);
        }
    }
}
