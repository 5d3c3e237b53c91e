//! Placeable regular polygons.

use std::f64::consts::TAU;

use nalgebra::{Point2, Vector2};

use crate::{PolygonId, Result, Similarity, TilingError};

/// Smallest polygon a user can attach.
pub const MIN_SIDES: usize = 3;
/// Largest polygon a user can attach.
pub const MAX_SIDES: usize = 12;
/// Side count of the degenerate seed that marks the initial cursor.
pub const SEED_SIDES: usize = 2;

/// A regular polygon with unit sides in its local frame, placed in the world
/// by a [`Similarity`].
///
/// Vertices and edges are numbered from 0 in counter-clockwise order. Edge `i`
/// runs from vertex `i` to vertex `i + 1`; the local shape stores vertex 0 a
/// second time at the end so the closing edge needs no wraparound.
///
/// The shape never changes after construction. Only the placement moves.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    id: PolygonId,
    sides: usize,
    shape: Vec<Point2<f64>>,
    placement: Similarity,
    color: usize,
}

impl Polygon {
    /// Builds a polygon whose edge 0 runs from `a` to `b`.
    ///
    /// Two sides are accepted for the seed; anything smaller is rejected.
    pub fn new(id: PolygonId, sides: usize, a: Point2<f64>, b: Point2<f64>) -> Result<Self> {
        if sides < SEED_SIDES {
            return Err(TilingError::InvalidSideCount {
                sides,
                min: SEED_SIDES,
                max: MAX_SIDES,
            });
        }

        Ok(Self::build(id, sides, a, b))
    }

    /// Builds the two-sided seed whose edge 0 runs from `a` to `b`.
    pub(crate) fn seed(id: PolygonId, a: Point2<f64>, b: Point2<f64>) -> Self {
        Self::build(id, SEED_SIDES, a, b)
    }

    fn build(id: PolygonId, sides: usize, a: Point2<f64>, b: Point2<f64>) -> Self {
        Self {
            id,
            sides,
            shape: unit_shape(sides),
            placement: Similarity::from_segment(a, b),
            color: 0,
        }
    }

    /// Moves the polygon so that its edge 0 runs from `a` to `b`.
    pub fn position_at(&mut self, a: Point2<f64>, b: Point2<f64>) {
        self.placement = Similarity::from_segment(a, b);
    }

    /// Places this polygon on the far side of `neighbor`'s edge `index`.
    ///
    /// Edge 0 of `self` ends up on that edge with opposite winding, so both
    /// polygons stay counter-clockwise and share the edge.
    pub fn bind_to(&mut self, neighbor: &Polygon, index: usize) {
        let (tail, head) = neighbor.edge(index);
        self.position_at(head, tail);
    }

    #[inline]
    pub fn id(&self) -> PolygonId {
        self.id
    }

    #[inline]
    pub fn sides(&self) -> usize {
        self.sides
    }

    #[inline]
    pub fn placement(&self) -> &Similarity {
        &self.placement
    }

    /// Display color index assigned by the session.
    #[inline]
    pub fn color(&self) -> usize {
        self.color
    }

    pub fn set_color(&mut self, color: usize) {
        self.color = color;
    }

    /// Returns vertex `i` in world space. Indices wrap around.
    pub fn world_vertex(&self, i: usize) -> Point2<f64> {
        self.placement.apply(&self.shape[i % self.shape.len()])
    }

    /// Returns the world-space endpoints of edge `i`.
    pub fn edge(&self, i: usize) -> (Point2<f64>, Point2<f64>) {
        let i = i % self.sides;
        (self.world_vertex(i), self.world_vertex(i + 1))
    }

    /// Iterates over the `sides` world-space vertices, without the closing duplicate.
    pub fn world_vertices(&self) -> impl Iterator<Item = Point2<f64>> + '_ {
        (0..self.sides).map(move |i| self.world_vertex(i))
    }

    /// Computes the centroid of the vertices in world space.
    pub fn centroid(&self) -> Point2<f64> {
        let sum: Vector2<f64> = self.world_vertices().map(|p| p.coords).sum();
        Point2::from(sum / self.sides as f64)
    }

    /// Returns true for the two-sided seed polygon.
    #[inline]
    pub fn is_seed(&self) -> bool {
        self.sides == SEED_SIDES
    }
}

/// Walks `sides` unit steps, turning by the exterior angle each time.
fn unit_shape(sides: usize) -> Vec<Point2<f64>> {
    let mut shape = Vec::with_capacity(sides + 1);
    let mut cursor = Vector2::zeros();
    for i in 0..sides {
        shape.push(Point2::from(cursor));
        let angle = TAU * i as f64 / sides as f64;
        cursor += Vector2::new(angle.cos(), angle.sin());
    }
    // Close exactly instead of trusting the accumulated sum.
    shape.push(shape[0]);
    shape
}
