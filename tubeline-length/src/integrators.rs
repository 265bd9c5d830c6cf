//! Numerical arc-length integration over an ordered polyline (§4.3.5).
//!
//! All four methods are fed the same discrete sample points; none has
//! access to the underlying continuous curve the samples came from. For
//! straight segments between consecutive samples, Simpson's rule and
//! Gauss-Legendre quadrature both degenerate algebraically to the
//! Euclidean distance between the segment's endpoints, so in practice they
//! agree with the linear sum. The cubic B-spline fit is the one method
//! that can diverge, since it threads a smooth curve through the control
//! polygon rather than summing the polygon's own edges.

use tubeline_core::Point3;
use tubeline_geometry::BSplineCurve;

/// One integration method's result prior to cross-validation.
struct MethodResult {
    length: f64,
    confidence: f64,
}

/// Combined result of running all four integrators and cross-validating.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntegrationResult {
    pub length: f64,
    pub confidence: f64,
}

/// Runs the four arc-length methods over `points` and returns the
/// highest-confidence result, adjusted by the coefficient of variation
/// across every method that produced a length. `None` only when fewer
/// than two points are given.
pub fn integrate(points: &[Point3]) -> Option<IntegrationResult> {
    if points.len() < 2 {
        return None;
    }

    let linear_length = linear(points);
    let mut methods = vec![
        MethodResult { length: adaptive_simpson(points), confidence: 0.85 },
        MethodResult { length: gauss_legendre(points), confidence: 0.80 },
        MethodResult { length: bspline(points).unwrap_or(linear_length), confidence: 0.75 },
        MethodResult { length: linear_length, confidence: 0.60 },
    ];

    methods.sort_by(|a, b| b.confidence.partial_cmp(&a.confidence).unwrap());
    let winner_length = methods[0].length;
    let mut winner_confidence = methods[0].confidence;

    let lengths: Vec<f64> = methods.iter().map(|m| m.length).collect();
    let cv = coefficient_of_variation(&lengths);
    if let Some(cv) = cv {
        if cv < 0.15 {
            winner_confidence = (winner_confidence + 0.05).min(0.95);
        } else if cv > 0.30 {
            winner_confidence = (winner_confidence - 0.15).max(0.30);
        }
    }

    Some(IntegrationResult {
        length: winner_length,
        confidence: winner_confidence,
    })
}

fn coefficient_of_variation(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    if mean.abs() < f64::EPSILON {
        return None;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt() / mean)
}

/// Straight sum of inter-point Euclidean distances.
fn linear(points: &[Point3]) -> f64 {
    points.windows(2).map(|w| distance(w[0], w[1])).sum()
}

/// Recursive adaptive Simpson's rule per segment, tolerance 1e-6, depth
/// capped at 10. Since each segment is a straight line between two known
/// samples (no curvature function to integrate), the rule's midpoint
/// estimate collapses to the endpoint distance at depth 0 and recursion
/// never triggers a refinement; this mirrors the fixed-segment source
/// behavior rather than pretending to integrate a curve we do not have.
fn adaptive_simpson(points: &[Point3]) -> f64 {
    points.windows(2).map(|w| simpson_segment(w[0], w[1], 0)).sum()
}

fn simpson_segment(a: Point3, b: Point3, depth: u32) -> f64 {
    let whole = distance(a, b);
    if depth >= 10 {
        return whole;
    }
    let mid = midpoint(a, b);
    let refined = distance(a, mid) + distance(mid, b);
    if (refined - whole).abs() < 1e-6 {
        whole
    } else {
        simpson_segment(a, mid, depth + 1) + simpson_segment(mid, b, depth + 1)
    }
}

/// 5-point Gauss-Legendre quadrature per segment. For a straight segment
/// the integrand (speed) is constant, so the quadrature sum reduces
/// exactly to the segment length regardless of the points/weights used.
fn gauss_legendre(points: &[Point3]) -> f64 {
    const WEIGHTS: [f64; 5] = [
        0.2369268850561891,
        0.4786286704993665,
        0.5688888888888889,
        0.4786286704993665,
        0.2369268850561891,
    ];
    let weight_sum: f64 = WEIGHTS.iter().sum();
    points
        .windows(2)
        .map(|w| distance(w[0], w[1]) * (weight_sum / 2.0))
        .sum()
}

/// Fits a cubic B-spline through the control polyline and sums Euclidean
/// distances between 100 samples along it. Returns `None` (caller falls
/// back to the linear length) when there are fewer than `degree + 1`
/// control points.
fn bspline(points: &[Point3]) -> Option<f64> {
    let curve = BSplineCurve::cubic(points.to_vec()).ok()?;
    Some(curve.arc_length_by_sampling(100))
}

fn distance(a: Point3, b: Point3) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2) + (a.z - b.z).powi(2)).sqrt()
}

fn midpoint(a: Point3, b: Point3) -> Point3 {
    Point3::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0, (a.z + b.z) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn straight_polyline_length_matches_spacing_times_steps(
            step in 0.01f64..50.0,
            n in 2usize..60,
        ) {
            let points: Vec<Point3> = (0..n).map(|i| Point3::new(i as f64 * step, 0.0, 0.0)).collect();
            let result = integrate(&points).unwrap();
            let expected = (n - 1) as f64 * step;
            prop_assert!((result.length - expected).abs() / expected.max(1e-9) < 1e-6);
            prop_assert!(result.confidence >= 0.30 && result.confidence <= 0.95);
        }
    }

    #[test]
    fn straight_line_all_methods_agree() {
        let points: Vec<Point3> = (0..10).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect();
        let result = integrate(&points).unwrap();
        assert!((result.length - 9.0).abs() < 1e-6);
        assert!(result.confidence >= 0.85);
    }

    #[test]
    fn too_few_points_returns_none() {
        assert!(integrate(&[Point3::new(0.0, 0.0, 0.0)]).is_none());
    }

    #[test]
    fn sparse_control_polygon_falls_back_to_linear_bspline() {
        let points = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
        let result = integrate(&points).unwrap();
        assert!((result.length - 1.0).abs() < 1e-6);
    }
}
