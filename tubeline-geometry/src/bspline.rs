use crate::{Error, KnotVec};
use tubeline_core::Point3;

/// A clamped, non-rational B-spline curve through 3D control points.
#[derive(Clone, Debug)]
pub struct BSplineCurve {
    degree: usize,
    knot_vec: KnotVec,
    control_points: Vec<Point3>,
}

impl BSplineCurve {
    /// Cubic (degree 3) clamped B-spline over `control_points`, with a
    /// uniform interior knot spacing.
    ///
    /// Falls back to the caller treating the points as a straight polyline
    /// when there are fewer than `degree + 1` control points.
    pub fn cubic(control_points: Vec<Point3>) -> Result<Self, Error> {
        Self::new(control_points, 3)
    }

    /// Builds a degree-`degree` clamped B-spline through `control_points`.
    pub fn new(control_points: Vec<Point3>, degree: usize) -> Result<Self, Error> {
        let n = control_points.len();
        if n < degree + 1 {
            return Err(Error::TooFewControlPoints {
                degree,
                needed: degree + 1,
                got: n,
            });
        }
        let knot_vec = KnotVec::uniform_clamped(n, degree);
        Ok(BSplineCurve {
            degree,
            knot_vec,
            control_points,
        })
    }

    /// Evaluates the curve at parameter `t` in `[0, 1]` via de Boor's algorithm.
    pub fn subs(&self, t: f64) -> Point3 {
        let t = t.clamp(0.0, 1.0);
        let k = self.knot_vec.floor(t, self.degree);
        let mut d: Vec<Point3> = (0..=self.degree)
            .map(|j| self.control_points[k - self.degree + j])
            .collect();
        for r in 1..=self.degree {
            for j in (r..=self.degree).rev() {
                let i = k - self.degree + j;
                let left = self.knot_vec[i];
                let right = self.knot_vec[i + self.degree - r + 1];
                let alpha = if (right - left).abs() < 1e-12 {
                    0.0
                } else {
                    (t - left) / (right - left)
                };
                d[j] = d[j - 1] + (d[j] - d[j - 1]) * alpha;
            }
        }
        d[self.degree]
    }

    /// Samples the curve at `samples` evenly spaced parameter values in
    /// `[0, 1]` (inclusive of both ends) and sums the Euclidean distance
    /// between consecutive samples.
    pub fn arc_length_by_sampling(&self, samples: usize) -> f64 {
        debug_assert!(samples >= 2);
        let mut total = 0.0;
        let mut prev = self.subs(0.0);
        for i in 1..samples {
            let t = i as f64 / (samples - 1) as f64;
            let cur = self.subs(t);
            total += cgmath::MetricSpace::distance(prev, cur);
            prev = cur;
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn clamped_curve_always_interpolates_its_endpoints(
            pts in prop::collection::vec(
                (-1000.0f64..1000.0, -1000.0f64..1000.0, -1000.0f64..1000.0),
                4..20,
            )
        ) {
            let control_points: Vec<Point3> = pts.iter().map(|&(x, y, z)| Point3::new(x, y, z)).collect();
            let first = control_points[0];
            let last = *control_points.last().unwrap();
            let curve = BSplineCurve::cubic(control_points).unwrap();
            prop_assert!(cgmath::MetricSpace::distance(curve.subs(0.0), first) < 1e-6);
            prop_assert!(cgmath::MetricSpace::distance(curve.subs(1.0), last) < 1e-6);
        }

        #[test]
        fn straight_control_polygon_yields_straight_sampled_length(
            n in 4usize..20,
            step in 0.1f64..20.0,
        ) {
            let control_points: Vec<Point3> = (0..n)
                .map(|i| Point3::new(i as f64 * step, 0.0, 0.0))
                .collect();
            let curve = BSplineCurve::cubic(control_points).unwrap();
            let len = curve.arc_length_by_sampling(100);
            let expected = (n - 1) as f64 * step;
            prop_assert!((len - expected).abs() / expected <= 1e-3);
        }
    }

    #[test]
    fn straight_line_has_exact_length() {
        let pts = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
        ];
        let curve = BSplineCurve::cubic(pts).unwrap();
        let len = curve.arc_length_by_sampling(100);
        assert!((len - 3.0).abs() < 1e-3, "length was {len}");
    }

    #[test]
    fn too_few_points_fails() {
        let pts = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
        assert!(BSplineCurve::cubic(pts).is_err());
    }

    #[test]
    fn endpoints_are_interpolated() {
        let pts = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(3.0, 1.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
        ];
        let curve = BSplineCurve::cubic(pts.clone()).unwrap();
        assert!(cgmath::MetricSpace::distance(curve.subs(0.0), pts[0]) < 1e-9);
        assert!(cgmath::MetricSpace::distance(curve.subs(1.0), *pts.last().unwrap()) < 1e-9);
    }
}
