//! Open-boundary and glued-edge bookkeeping.
//!
//! The tracker keeps every live edge in exactly one of two places:
//!
//! - the boundary ring, the circular walk of edges that are still open and
//!   can take a new polygon, with a cursor on one of them;
//! - the link map, a symmetric map between pairs of edges that were found to
//!   lie on the same segment with opposite winding.
//!
//! Edges move from the ring to the link map only when they are adjacent on
//! the ring next to a freshly attached polygon. Overlaps elsewhere stay
//! undetected, which keeps both attach and detach local operations.

use std::collections::HashMap;

use log::{debug, info, warn};
use nalgebra::Point2;

use crate::{
    EdgeRef, EdgeRing, Polygon, PolygonArena, PolygonId, Result, RingPos, TilingError, MAX_SIDES,
    MIN_SIDES,
};

/// Circular list of open edges, the cursor into it, and the map of glued edges.
#[derive(Debug, Clone)]
pub struct BoundaryTracker {
    ring: EdgeRing<EdgeRef>,
    links: HashMap<EdgeRef, EdgeRef>,
    cursor: RingPos,
    epsilon: f64,
}

impl BoundaryTracker {
    /// Creates a tracker whose only open edge is edge 0 of the arena's seed.
    pub fn new(polygons: &PolygonArena, epsilon: f64) -> Self {
        let mut ring = EdgeRing::new();
        let cursor = ring.push_back(EdgeRef::new(polygons.seed().id(), 0));
        Self {
            ring,
            links: HashMap::new(),
            cursor,
            epsilon,
        }
    }

    /// Attaches a new `sides`-gon on the cursor edge and glues whatever it closes.
    ///
    /// The new polygon's edges are spliced into the ring right after the
    /// cursor. Two sweeps then walk outward from the seams on either side of
    /// the spliced run, moving coincident neighbours into the link map. The
    /// cursor ends on the first open edge left of the new run.
    ///
    /// On error the arena and the tracker are left as they were.
    pub fn attach(&mut self, polygons: &mut PolygonArena, sides: usize) -> Result<PolygonId> {
        check_sides(sides)?;

        if polygons.is_empty() {
            return self.attach_first(polygons, sides);
        }

        let at = self.cursor_edge();
        let id = polygons.allocate_id();
        let mut polygon = Polygon::new(id, sides, Point2::origin(), Point2::new(1.0, 0.0))?;
        polygon.bind_to(polygons.get(at.polygon)?, at.index);
        polygons.push(polygon);

        let snapshot = (self.ring.clone(), self.links.clone(), self.cursor);
        if let Err(err) = self.glue(polygons, id, sides) {
            (self.ring, self.links, self.cursor) = snapshot;
            polygons.pop();
            warn!("attaching a {sides}-gon at {at} failed: {err}");
            return Err(err);
        }

        if self.ring[self.cursor].polygon != id {
            warn!("polygon {id} closed every one of its edges; it cannot be detached again");
        }
        debug!(
            "attached {sides}-gon {id} at {at}: {} open edges, {} links",
            self.ring.len(),
            self.links.len()
        );
        Ok(id)
    }

    /// Places the first real polygon on the seed and makes its edges the boundary.
    fn attach_first(&mut self, polygons: &mut PolygonArena, sides: usize) -> Result<PolygonId> {
        let (a, b) = polygons.seed().edge(0);
        let id = polygons.allocate_id();
        polygons.push(Polygon::new(id, sides, a, b)?);

        self.links.clear();
        self.ring = (0..sides).map(|i| EdgeRef::new(id, i)).collect();
        self.cursor = self.ring.head().ok_or(TilingError::BoundaryExhausted)?;
        debug!("attached first polygon {id} with {sides} sides");
        Ok(id)
    }

    /// Splices the edges of `id` after the cursor and runs both seam sweeps.
    fn glue(&mut self, polygons: &PolygonArena, id: PolygonId, sides: usize) -> Result<()> {
        let mut right = self.ring.next(self.cursor);
        let mut left = self
            .ring
            .splice_before(right, (0..sides).map(|i| EdgeRef::new(id, i)))
            .ok_or(TilingError::NoReachableBoundary(id))?;

        // Right seam: the new run's tail against the old successors.
        while self.ring.len() >= 2 {
            let before = self.ring.prev(right);
            if !self.coincide(polygons, right, before)? {
                break;
            }
            self.close_pair(before, right)?;

            if before == left {
                // The sweep ate the whole new run; keep `left` on a live element.
                left = self.ring.next(right);
                self.ring.remove(before);
                self.ring.remove(right);
                break;
            }

            let after = self.ring.next(right);
            self.ring.remove(before);
            self.ring.remove(right);
            right = after;
        }

        // Left seam: the new run's head against the old predecessors.
        while self.ring.len() >= 2 {
            let before = self.ring.prev(left);
            if !self.coincide(polygons, left, before)? {
                break;
            }
            self.close_pair(before, left)?;

            let after = self.ring.next(left);
            self.ring.remove(before);
            self.ring.remove(left);
            left = after;
        }

        self.cursor = left;
        Ok(())
    }

    /// Links the edges at two adjacent ring positions, refusing to empty the ring.
    fn close_pair(&mut self, a: RingPos, b: RingPos) -> Result<()> {
        if self.ring.len() <= 2 {
            return Err(TilingError::BoundaryExhausted);
        }
        let (a, b) = (self.ring[a], self.ring[b]);
        self.links.insert(a, b);
        self.links.insert(b, a);
        Ok(())
    }

    fn coincide(&self, polygons: &PolygonArena, a: RingPos, b: RingPos) -> Result<bool> {
        self.ring[a].coincides_with(&self.ring[b], polygons, self.epsilon)
    }

    /// Removes the most recently attached polygon and reopens the edges it closed.
    ///
    /// Detaching from an arena with a single polygon is a [`reset`](Self::reset);
    /// with no polygon it does nothing. Every structural check runs before
    /// anything is modified, so an error leaves the tiling untouched.
    pub fn detach_last(&mut self, polygons: &mut PolygonArena) -> Result<()> {
        let (id, sides) = match polygons.last() {
            Some(last) => (last.id(), last.sides()),
            None => return Ok(()),
        };
        if polygons.len() == 1 {
            self.reset(polygons);
            return Ok(());
        }

        let run = self.locate_run(id)?;
        let (Some(&run_start), Some(&run_end)) = (run.first(), run.last()) else {
            return Err(TilingError::NoReachableBoundary(id));
        };
        let low = self.ring[run_start].index;
        let high = self.ring[run_end].index;

        let closed: Vec<usize> = (0..low).chain(high + 1..sides).collect();
        if let Some(&side) = closed
            .iter()
            .find(|&&side| !self.links.contains_key(&EdgeRef::new(id, side)))
        {
            return Err(TilingError::MissingLink(EdgeRef::new(id, side)));
        }
        if closed.is_empty() && run.len() == self.ring.len() {
            return Err(TilingError::BoundaryExhausted);
        }

        // Partners of the high sides go back after the run, nearest side closest.
        let mut anchor = self.ring.next(run_end);
        for side in high + 1..sides {
            let partner = self.unlink(EdgeRef::new(id, side))?;
            anchor = self.ring.insert_before(anchor, partner);
        }
        // Partners of the low sides go back before it, nearest side closest.
        for side in (0..low).rev() {
            let partner = self.unlink(EdgeRef::new(id, side))?;
            self.ring.insert_before(run_start, partner);
        }

        if self.ring[self.cursor].polygon == id {
            self.cursor = self.ring.prev(run_start);
        }
        for pos in run {
            self.ring.remove(pos);
        }
        polygons.pop();

        debug!(
            "detached polygon {id}: {} open edges, {} links",
            self.ring.len(),
            self.links.len()
        );
        Ok(())
    }

    /// Finds the ring positions holding `id`'s open edges, in ring order.
    ///
    /// The ring is circular, so the run is found by stepping back from any of
    /// its members rather than from the ring's head.
    fn locate_run(&self, id: PolygonId) -> Result<Vec<RingPos>> {
        let belongs = |pos: RingPos| self.ring[pos].polygon == id;

        let found = self
            .ring
            .position(|edge| edge.polygon == id)
            .ok_or(TilingError::NoReachableBoundary(id))?;
        let total = self.ring.iter().filter(|edge| edge.polygon == id).count();

        let mut start = found;
        for _ in 1..self.ring.len() {
            let prev = self.ring.prev(start);
            if !belongs(prev) {
                break;
            }
            start = prev;
        }

        let mut run = Vec::with_capacity(total);
        let mut pos = start;
        while run.len() < total && belongs(pos) {
            run.push(pos);
            pos = self.ring.next(pos);
        }

        let ascending = run
            .windows(2)
            .all(|pair| self.ring[pair[1]].index == self.ring[pair[0]].index + 1);
        if run.len() != total || !ascending {
            return Err(TilingError::NonContiguousRun(id));
        }
        Ok(run)
    }

    /// Removes both directions of `edge`'s link and returns its partner.
    fn unlink(&mut self, edge: EdgeRef) -> Result<EdgeRef> {
        let partner = self
            .links
            .remove(&edge)
            .ok_or(TilingError::MissingLink(edge))?;
        self.links.remove(&partner);
        Ok(partner)
    }

    /// Drops every polygon and reseeds the boundary with the seed edge.
    pub fn reset(&mut self, polygons: &mut PolygonArena) {
        polygons.reset();
        self.ring.clear();
        self.links.clear();
        self.cursor = self.ring.push_back(EdgeRef::new(polygons.seed().id(), 0));
        info!("tiling reset");
    }

    /// Moves the cursor to the next open edge.
    pub fn advance_cursor(&mut self) {
        self.cursor = self.ring.next(self.cursor);
    }

    /// Moves the cursor to the previous open edge.
    pub fn retreat_cursor(&mut self) {
        self.cursor = self.ring.prev(self.cursor);
    }

    /// The open edge the next polygon will be attached to.
    #[inline]
    pub fn cursor_edge(&self) -> EdgeRef {
        self.ring[self.cursor]
    }

    /// Open edges in ring order, starting from the ring's head.
    pub fn boundary_edges(&self) -> impl Iterator<Item = EdgeRef> + '_ {
        self.ring.iter().copied()
    }

    #[inline]
    pub fn boundary_len(&self) -> usize {
        self.ring.len()
    }

    /// Glued pairs. Each pair appears once per direction.
    pub fn links(&self) -> impl Iterator<Item = (EdgeRef, EdgeRef)> + '_ {
        self.links.iter().map(|(&a, &b)| (a, b))
    }

    /// Number of link map entries, i.e. twice the number of glued pairs.
    #[inline]
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// The edge glued to `edge`, if any.
    pub fn partner(&self, edge: EdgeRef) -> Option<EdgeRef> {
        self.links.get(&edge).copied()
    }

    /// Returns true if `edge` is on the open boundary.
    pub fn is_open(&self, edge: EdgeRef) -> bool {
        self.ring.iter().any(|&open| open == edge)
    }

    #[inline]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

fn check_sides(sides: usize) -> Result<()> {
    if (MIN_SIDES..=MAX_SIDES).contains(&sides) {
        Ok(())
    } else {
        Err(TilingError::InvalidSideCount {
            sides,
            min: MIN_SIDES,
            max: MAX_SIDES,
        })
    }
}
