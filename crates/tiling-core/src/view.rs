//! Pan and zoom applied on top of world coordinates.

use nalgebra::{Point2, Vector2};

/// Maps world points to view points as `(p + pan) * zoom`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    zoom: f64,
    pan: Vector2<f64>,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Vector2::zeros(),
        }
    }
}

impl ViewTransform {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    #[inline]
    pub fn pan(&self) -> Vector2<f64> {
        self.pan
    }

    pub fn apply(&self, point: &Point2<f64>) -> Point2<f64> {
        Point2::from((point.coords + self.pan) * self.zoom)
    }

    /// Inverse of [`apply`](Self::apply).
    pub fn to_world(&self, point: &Point2<f64>) -> Point2<f64> {
        Point2::from(point.coords / self.zoom - self.pan)
    }

    pub fn zoom_in(&mut self) {
        self.zoom *= 2.0;
    }

    pub fn zoom_out(&mut self) {
        self.zoom /= 2.0;
    }

    /// Moves the camera by `direction` world units; the content moves the other way.
    pub fn translate(&mut self, direction: Vector2<f64>) {
        self.pan -= direction;
    }

    /// Recenters on the world origin, keeping the zoom.
    pub fn reset_center(&mut self) {
        self.pan = Vector2::zeros();
    }
}
