//! Boundary and adjacency tracking for edge-to-edge tilings of regular polygons.
//!
//! A tiling is grown one polygon at a time from a cursor that always sits on
//! an open (unglued) edge. The [`Tiling`] session owns the polygons and drives
//! a [`BoundaryTracker`], which keeps the circular list of open edges and the
//! symmetric map of glued edge pairs in sync as polygons are attached and
//! detached.
//!
//! # Example
//!
//! ```
//! use tiling_core::Tiling;
//!
//! let mut tiling = Tiling::new();
//! tiling.add_polygon(3)?;
//! tiling.add_polygon(3)?;
//!
//! assert_eq!(tiling.boundary_len(), 4);
//! assert_eq!(tiling.link_count(), 2);
//!
//! tiling.remove_last_polygon()?;
//! assert_eq!(tiling.boundary_len(), 3);
//! # Ok::<(), tiling_core::TilingError>(())
//! ```

mod arena;
mod edge;
mod error;
mod geometry;
mod polygon;
mod ring;
mod session;
mod tracker;
mod view;

pub use arena::{PolygonArena, PolygonId};
pub use edge::{segments_coincide, EdgeRef, COINCIDENCE_EPSILON};
pub use error::{Result, TilingError};
pub use geometry::Similarity;
pub use polygon::{Polygon, MAX_SIDES, MIN_SIDES, SEED_SIDES};
pub use ring::{EdgeRing, RingPos};
pub use session::{Tiling, TilingConfig};
pub use tracker::BoundaryTracker;
pub use view::ViewTransform;
