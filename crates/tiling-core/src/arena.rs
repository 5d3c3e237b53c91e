//! Ownership of polygons, keyed by stable ids.

use std::fmt;

use nalgebra::Point2;

use crate::{Polygon, Result, TilingError};

/// Stable identity of a polygon. Ids are handed out in increasing order and
/// never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PolygonId(u64);

impl PolygonId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PolygonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The polygons of a tiling in creation order, plus the seed.
///
/// The seed is a degenerate two-sided polygon lying on the seed segment. It
/// only exists so the cursor has an edge to point at before the first real
/// polygon is attached, and it is not counted by [`len`](Self::len).
#[derive(Debug, Clone)]
pub struct PolygonArena {
    seed: Polygon,
    polygons: Vec<Polygon>,
    next_id: u64,
}

impl PolygonArena {
    /// Creates an empty arena whose seed runs from `a` to `b`.
    pub fn new(a: Point2<f64>, b: Point2<f64>) -> Self {
        Self {
            seed: Polygon::seed(PolygonId(0), a, b),
            polygons: Vec::new(),
            next_id: 1,
        }
    }

    /// Reserves a fresh id.
    pub fn allocate_id(&mut self) -> PolygonId {
        let id = PolygonId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Appends a polygon built with an id from [`allocate_id`](Self::allocate_id).
    pub fn push(&mut self, polygon: Polygon) {
        debug_assert!(
            self.polygons.last().is_none_or(|last| last.id() < polygon.id()),
            "polygons must be pushed in id order"
        );
        self.polygons.push(polygon);
    }

    /// Removes and returns the most recently pushed polygon.
    pub fn pop(&mut self) -> Option<Polygon> {
        self.polygons.pop()
    }

    /// Drops every polygon and replaces the seed with a fresh one on the same segment.
    pub fn reset(&mut self) {
        self.polygons.clear();
        let (a, b) = self.seed.edge(0);
        let id = self.allocate_id();
        self.seed = Polygon::seed(id, a, b);
    }

    #[inline]
    pub fn seed(&self) -> &Polygon {
        &self.seed
    }

    /// Looks up a live polygon, the seed included.
    pub fn get(&self, id: PolygonId) -> Result<&Polygon> {
        if id == self.seed.id() {
            return Ok(&self.seed);
        }
        self.index_of(id)
            .map(|i| &self.polygons[i])
            .ok_or(TilingError::UnknownPolygon(id))
    }

    pub fn get_mut(&mut self, id: PolygonId) -> Result<&mut Polygon> {
        if id == self.seed.id() {
            return Ok(&mut self.seed);
        }
        match self.index_of(id) {
            Some(i) => Ok(&mut self.polygons[i]),
            None => Err(TilingError::UnknownPolygon(id)),
        }
    }

    pub fn contains(&self, id: PolygonId) -> bool {
        self.get(id).is_ok()
    }

    #[inline]
    pub fn last(&self) -> Option<&Polygon> {
        self.polygons.last()
    }

    /// Number of real polygons, the seed excluded.
    #[inline]
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Iterates over the real polygons in creation order.
    pub fn iter(&self) -> std::slice::Iter<'_, Polygon> {
        self.polygons.iter()
    }

    fn index_of(&self, id: PolygonId) -> Option<usize> {
        self.polygons.binary_search_by_key(&id, Polygon::id).ok()
    }
}
