//! Planar similarity transforms.

use nalgebra::{Matrix2, Point2, Vector2};

/// Rotation, uniform scale and translation in the plane.
///
/// Stored as the rotation-scale matrix `[[dx, -dy], [dy, dx]]` and a
/// translation, which is exactly the complex multiplication by `d = b - a`
/// followed by a shift to `a`. A zero-length `d` collapses the plane onto
/// `a` instead of failing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Similarity {
    linear: Matrix2<f64>,
    translation: Vector2<f64>,
}

impl Similarity {
    /// Returns the transform mapping `(0, 0)` to `a` and `(1, 0)` to `b`.
    pub fn from_segment(a: Point2<f64>, b: Point2<f64>) -> Self {
        let d = b - a;
        Self {
            linear: Matrix2::new(d.x, -d.y, d.y, d.x),
            translation: a.coords,
        }
    }

    /// Applies the transform to a point.
    #[inline]
    pub fn apply(&self, point: &Point2<f64>) -> Point2<f64> {
        Point2::from(self.linear * point.coords + self.translation)
    }

    /// Uniform scale factor.
    pub fn scale(&self) -> f64 {
        Vector2::new(self.linear.m11, self.linear.m21).norm()
    }

    /// Rotation angle in radians, in `(-pi, pi]`.
    pub fn angle(&self) -> f64 {
        self.linear.m21.atan2(self.linear.m11)
    }

    #[inline]
    pub fn translation(&self) -> Vector2<f64> {
        self.translation
    }
}

impl Default for Similarity {
    fn default() -> Self {
        Self::from_segment(Point2::origin(), Point2::new(1.0, 0.0))
    }
}
