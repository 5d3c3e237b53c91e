//! Lightweight references to polygon edges.

use std::fmt;

use nalgebra::{distance, Point2};

use crate::{PolygonArena, PolygonId, Result};

/// Points closer than this are considered the same vertex.
pub const COINCIDENCE_EPSILON: f64 = 1e-5;

/// Edge `index` of polygon `polygon`.
///
/// This is a non-owning handle: it stays meaningful only while the polygon is
/// alive in the [`PolygonArena`]. Equality and hashing use the id and index,
/// never the geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeRef {
    pub polygon: PolygonId,
    pub index: usize,
}

impl EdgeRef {
    pub const fn new(polygon: PolygonId, index: usize) -> Self {
        Self { polygon, index }
    }

    /// Returns the world-space endpoints of the referenced edge.
    pub fn segment(&self, polygons: &PolygonArena) -> Result<(Point2<f64>, Point2<f64>)> {
        Ok(polygons.get(self.polygon)?.edge(self.index))
    }

    /// Returns true if both edges lie on the same segment with opposite winding.
    pub fn coincides_with(
        &self,
        other: &EdgeRef,
        polygons: &PolygonArena,
        epsilon: f64,
    ) -> Result<bool> {
        Ok(segments_coincide(
            self.segment(polygons)?,
            other.segment(polygons)?,
            epsilon,
        ))
    }
}

impl fmt::Display for EdgeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.polygon, self.index)
    }
}

/// Tests whether the head of each segment matches the tail of the other.
///
/// Symmetric in its two segment arguments.
pub fn segments_coincide(
    (tail_a, head_a): (Point2<f64>, Point2<f64>),
    (tail_b, head_b): (Point2<f64>, Point2<f64>),
    epsilon: f64,
) -> bool {
    distance(&head_a, &tail_b) < epsilon && distance(&tail_a, &head_b) < epsilon
}
