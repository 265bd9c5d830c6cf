//! Curvature method (§4.4): a 5-point stencil over the per-vertex turning
//! angle sequence.
//!
//! Each sample's turning angle `T(i)` is the angle between the incoming
//! and outgoing edge directions at that point; the stencil sums the
//! magnitude of its second difference over a 5-point window, which
//! responds to a genuine change in curvature rather than to curvature
//! itself (a constant bend radius has steady `T`, so its second
//! difference stays near zero; only where the bend starts or ends does
//! the stencil spike).

use tubeline_core::Point3;

const THRESHOLD: f64 = 0.2;

pub(crate) fn bend_count(points: &[Point3]) -> u32 {
    let turning = turning_angles(points);
    if turning.len() < 4 {
        return 0;
    }
    let mut count = 0;
    for i in 2..turning.len() - 1 {
        let stencil = (turning[i - 1] - turning[i - 2]).abs() + (turning[i + 1] - turning[i]).abs();
        if stencil > THRESHOLD {
            count += 1;
        }
    }
    (count / 3) as u32
}

pub(crate) fn confidence(sample_count: usize) -> f64 {
    (0.5 + sample_count as f64 / 200.0).min(0.9)
}

/// `T(k)`, the turning angle at each interior sample point.
fn turning_angles(points: &[Point3]) -> Vec<f64> {
    let mut angles = Vec::with_capacity(points.len().saturating_sub(2));
    for i in 1..points.len().saturating_sub(1) {
        let incoming = sub(points[i], points[i - 1]);
        let outgoing = sub(points[i + 1], points[i]);
        angles.push(angle_between(incoming, outgoing));
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_line_has_no_turning() {
        let points: Vec<Point3> = (0..20).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect();
        assert_eq!(bend_count(&points), 0);
    }

    #[test]
    fn sharp_single_corner_is_detected() {
        let mut points = Vec::new();
        for i in 0..10 {
            points.push(Point3::new(i as f64, 0.0, 0.0));
        }
        for i in 1..10 {
            points.push(Point3::new(9.0, i as f64, 0.0));
        }
        assert!(bend_count(&points) >= 1);
    }

    #[test]
    fn confidence_scales_with_sample_count_and_caps_at_point_nine() {
        assert!((confidence(0) - 0.5).abs() < 1e-9);
        assert!((confidence(60) - 0.8).abs() < 1e-9);
        assert_eq!(confidence(1000), 0.9);
    }
}
