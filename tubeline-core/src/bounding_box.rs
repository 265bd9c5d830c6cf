use crate::{Point3, Vector3};
use cgmath::MetricSpace;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box over 3D points, built incrementally by [`push`](Self::push).
///
/// Positions with a NaN or infinite component are rejected so a single
/// malformed vertex cannot poison unit inference or length estimation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    min: Point3,
    max: Point3,
}

impl Default for BoundingBox {
    fn default() -> Self {
        BoundingBox {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }
}

impl BoundingBox {
    /// Creates an empty bounding box.
    pub fn new() -> Self { Self::default() }

    /// Adds a point. Points with non-finite components are silently skipped.
    pub fn push(&mut self, point: &Point3) {
        if !point.x.is_finite() || !point.y.is_finite() || !point.z.is_finite() {
            return;
        }
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    /// True if no point has ever been pushed.
    pub fn is_empty(&self) -> bool { self.min.x > self.max.x }

    /// Minimum corner.
    pub fn min(&self) -> Point3 { self.min }

    /// Maximum corner.
    pub fn max(&self) -> Point3 { self.max }

    /// `max - min`, per axis.
    pub fn diagonal(&self) -> Vector3 { self.max - self.min }

    /// Euclidean length of the diagonal.
    pub fn diameter(&self) -> f64 {
        if self.is_empty() {
            f64::NEG_INFINITY
        } else {
            self.min.distance(self.max)
        }
    }

    /// Longest edge of the box, i.e. the max component of [`diagonal`](Self::diagonal).
    pub fn size(&self) -> f64 {
        let d = self.diagonal();
        d.x.max(d.y).max(d.z)
    }

    /// Midpoint of the box.
    pub fn center(&self) -> Point3 {
        self.min + self.diagonal() / 2.0
    }

    /// The three edge lengths, sorted descending: `(longest, middle, shortest)`.
    pub fn sorted_dimensions(&self) -> (f64, f64, f64) {
        let d = self.diagonal();
        let mut dims = [d.x.abs(), d.y.abs(), d.z.abs()];
        dims.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
        (dims[0], dims[1], dims[2])
    }
}

impl<'a> FromIterator<&'a Point3> for BoundingBox {
    fn from_iter<I: IntoIterator<Item = &'a Point3>>(iter: I) -> Self {
        let mut bbox = BoundingBox::new();
        iter.into_iter().for_each(|pt| bbox.push(pt));
        bbox
    }
}

impl FromIterator<Point3> for BoundingBox {
    fn from_iter<I: IntoIterator<Item = Point3>>(iter: I) -> Self {
        let mut bbox = BoundingBox::new();
        iter.into_iter().for_each(|pt| bbox.push(&pt));
        bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn sorted_dimensions_are_descending_and_match_the_diagonal(
            points in prop::collection::vec(
                (-1000.0f64..1000.0, -1000.0f64..1000.0, -1000.0f64..1000.0),
                2..20,
            )
        ) {
            let bbox: BoundingBox = points
                .iter()
                .map(|&(x, y, z)| Point3::new(x, y, z))
                .collect();
            let (longest, middle, shortest) = bbox.sorted_dimensions();
            prop_assert!(longest >= middle);
            prop_assert!(middle >= shortest);
            prop_assert!(shortest >= 0.0);
            prop_assert!((longest - bbox.size()).abs() < 1e-9);
        }
    }

    #[test]
    fn push_and_query() {
        let bbox: BoundingBox = [
            Point3::new(-1.0, 2.0, 0.0),
            Point3::new(3.0, -4.0, 5.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(bbox.min(), Point3::new(-1.0, -4.0, 0.0));
        assert_eq!(bbox.max(), Point3::new(3.0, 2.0, 5.0));
        assert_eq!(bbox.size(), 9.0);
    }

    #[test]
    fn nan_components_are_ignored() {
        let mut bbox = BoundingBox::new();
        bbox.push(&Point3::new(1.0, 1.0, 1.0));
        bbox.push(&Point3::new(f64::NAN, 2.0, 2.0));
        assert_eq!(bbox.max(), Point3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn empty_box_has_no_volume() {
        let bbox = BoundingBox::new();
        assert!(bbox.is_empty());
        assert_eq!(bbox.diameter(), f64::NEG_INFINITY);
    }
}
