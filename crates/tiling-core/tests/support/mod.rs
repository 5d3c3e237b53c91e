//! Test support library
//! Snapshots and invariant checks shared by the integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};

use tiling_core::{EdgeRef, Tiling};

/// Boundary and link state of a tiling at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub boundary: Vec<EdgeRef>,
    pub links: HashMap<EdgeRef, EdgeRef>,
    pub cursor: EdgeRef,
    pub polygons: usize,
}

impl State {
    pub fn of(tiling: &Tiling) -> Self {
        Self {
            boundary: tiling.iter_boundary_edges().collect(),
            links: tiling.links().collect(),
            cursor: tiling.current_cursor_edge(),
            polygons: tiling.polygon_count(),
        }
    }

    /// Same state, with the boundary compared as a circular sequence.
    pub fn same_as(&self, other: &State) -> bool {
        self.links == other.links
            && self.cursor == other.cursor
            && self.polygons == other.polygons
            && circular_eq(&self.boundary, &other.boundary)
    }
}

/// Returns true if `b` is a rotation of `a`.
pub fn circular_eq(a: &[EdgeRef], b: &[EdgeRef]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    if a.is_empty() {
        return true;
    }
    (0..b.len()).any(|shift| a.iter().zip(b.iter().cycle().skip(shift)).all(|(x, y)| x == y))
}

/// Checks every structural invariant of the boundary and the link map.
pub fn assert_invariants(tiling: &Tiling) {
    let boundary: Vec<EdgeRef> = tiling.iter_boundary_edges().collect();
    let open: HashSet<EdgeRef> = boundary.iter().copied().collect();
    assert_eq!(open.len(), boundary.len(), "an edge is open twice: {boundary:?}");
    assert!(!boundary.is_empty(), "the boundary must never be empty");
    assert!(
        open.contains(&tiling.current_cursor_edge()),
        "cursor is not on the boundary"
    );

    let links: HashMap<EdgeRef, EdgeRef> = tiling.links().collect();
    for (a, b) in &links {
        assert_eq!(links.get(b), Some(a), "link {a} -> {b} is not symmetric");
        assert!(!open.contains(a), "{a} is both open and linked");
        assert_ne!(a.polygon, b.polygon, "{a} is linked to its own polygon");
    }

    for edge in open.iter().chain(links.keys()) {
        assert!(tiling.polygon(edge.polygon).is_ok(), "{edge} names a dead polygon");
    }

    for polygon in tiling.iter_polygons() {
        for index in 0..polygon.sides() {
            let edge = EdgeRef::new(polygon.id(), index);
            assert!(
                open.contains(&edge) ^ links.contains_key(&edge),
                "{edge} must be either open or linked"
            );
        }
    }
}

/// Adds polygons in order, panicking on the first failure.
pub fn build(sides: &[usize]) -> Tiling {
    let mut tiling = Tiling::new();
    for &n in sides {
        tiling
            .add_polygon(n)
            .unwrap_or_else(|err| panic!("adding a {n}-gon failed: {err}"));
    }
    tiling
}
