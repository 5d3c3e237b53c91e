//! The tiling session exposed to the presentation layer.

use log::warn;
use nalgebra::Point2;

use crate::{
    BoundaryTracker, EdgeRef, Polygon, PolygonArena, PolygonId, Result, TilingError,
    ViewTransform, COINCIDENCE_EPSILON,
};

/// Construction parameters of a [`Tiling`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilingConfig {
    /// Length of every polygon side; the seed edge runs from the origin along +x.
    pub edge_length: f64,
    /// Distance under which two vertices count as the same point.
    pub epsilon: f64,
}

impl Default for TilingConfig {
    fn default() -> Self {
        Self {
            edge_length: 1.0,
            epsilon: COINCIDENCE_EPSILON,
        }
    }
}

impl TilingConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.edge_length.is_finite() && self.edge_length > 0.0) {
            return Err(TilingError::InvalidConfig("edge_length must be positive and finite"));
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(TilingError::InvalidConfig("epsilon must be positive and finite"));
        }
        if self.epsilon >= self.edge_length / 2.0 {
            return Err(TilingError::InvalidConfig("epsilon must be well below edge_length"));
        }
        Ok(())
    }
}

/// An interactively grown tiling: polygons, open boundary, cursor and view.
///
/// Every command either completes or returns an error with the tiling left
/// unchanged.
#[derive(Debug, Clone)]
pub struct Tiling {
    polygons: PolygonArena,
    tracker: BoundaryTracker,
    view: ViewTransform,
    config: TilingConfig,
}

impl Default for Tiling {
    fn default() -> Self {
        Self::new()
    }
}

impl Tiling {
    /// Creates an empty tiling with unit edges.
    pub fn new() -> Self {
        Self::build(TilingConfig::default())
    }

    pub fn with_config(config: TilingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: TilingConfig) -> Self {
        let polygons = PolygonArena::new(Point2::origin(), Point2::new(config.edge_length, 0.0));
        let tracker = BoundaryTracker::new(&polygons, config.epsilon);
        Self {
            polygons,
            tracker,
            view: ViewTransform::new(),
            config,
        }
    }

    /// Attaches a regular `sides`-gon on the cursor edge and colors it.
    pub fn add_polygon(&mut self, sides: usize) -> Result<PolygonId> {
        let id = self.tracker.attach(&mut self.polygons, sides)?;
        let color = self.free_color(id)?;
        self.polygons.get_mut(id)?.set_color(color);
        Ok(id)
    }

    /// Lowest color index not used by any polygon glued to `id`.
    fn free_color(&self, id: PolygonId) -> Result<usize> {
        let sides = self.polygons.get(id)?.sides();
        let taken: Vec<usize> = (0..sides)
            .filter_map(|i| self.tracker.partner(EdgeRef::new(id, i)))
            .filter_map(|edge| self.polygons.get(edge.polygon).ok())
            .filter(|neighbor| !neighbor.is_seed())
            .map(Polygon::color)
            .collect();
        Ok((0..=taken.len())
            .find(|color| !taken.contains(color))
            .unwrap_or_default())
    }

    /// Removes the most recently added polygon. Does nothing on an empty tiling.
    pub fn remove_last_polygon(&mut self) -> Result<()> {
        match self.polygons.len() {
            0 => Ok(()),
            1 => {
                self.clear();
                Ok(())
            }
            _ => self
                .tracker
                .detach_last(&mut self.polygons)
                .inspect_err(|err| warn!("cannot remove the last polygon: {err}")),
        }
    }

    /// Removes every polygon, reseeds the cursor and recenters the view.
    pub fn clear(&mut self) {
        self.tracker.reset(&mut self.polygons);
        self.view.reset_center();
    }

    /// Same as [`clear`](Self::clear).
    pub fn reset(&mut self) {
        self.clear();
    }

    pub fn advance_cursor(&mut self) {
        self.tracker.advance_cursor();
    }

    pub fn retreat_cursor(&mut self) {
        self.tracker.retreat_cursor();
    }

    /// The open edge the next polygon will be attached to.
    pub fn current_cursor_edge(&self) -> EdgeRef {
        self.tracker.cursor_edge()
    }

    /// Open edges in boundary order.
    pub fn iter_boundary_edges(&self) -> impl Iterator<Item = EdgeRef> + '_ {
        self.tracker.boundary_edges()
    }

    /// Polygons in creation order, the seed excluded.
    pub fn iter_polygons(&self) -> impl Iterator<Item = &Polygon> + '_ {
        self.polygons.iter()
    }

    /// Glued edge pairs, once per direction.
    pub fn links(&self) -> impl Iterator<Item = (EdgeRef, EdgeRef)> + '_ {
        self.tracker.links()
    }

    pub fn partner(&self, edge: EdgeRef) -> Option<EdgeRef> {
        self.tracker.partner(edge)
    }

    pub fn polygon(&self, id: PolygonId) -> Result<&Polygon> {
        self.polygons.get(id)
    }

    pub fn color_of(&self, id: PolygonId) -> Result<usize> {
        Ok(self.polygons.get(id)?.color())
    }

    /// World-space endpoints of `edge`.
    pub fn edge_segment(&self, edge: EdgeRef) -> Result<(Point2<f64>, Point2<f64>)> {
        edge.segment(&self.polygons)
    }

    #[inline]
    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    #[inline]
    pub fn boundary_len(&self) -> usize {
        self.tracker.boundary_len()
    }

    #[inline]
    pub fn link_count(&self) -> usize {
        self.tracker.link_count()
    }

    #[inline]
    pub fn tracker(&self) -> &BoundaryTracker {
        &self.tracker
    }

    #[inline]
    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    #[inline]
    pub fn view_mut(&mut self) -> &mut ViewTransform {
        &mut self.view
    }

    #[inline]
    pub fn config(&self) -> &TilingConfig {
        &self.config
    }
}
