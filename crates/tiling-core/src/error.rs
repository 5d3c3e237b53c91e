//! Error type shared by every tiling operation.

use crate::{EdgeRef, PolygonId};

/// Everything that can make a tiling command fail.
///
/// A failed command never leaves the tiling half-modified: each variant is
/// reported either before any mutation or after the mutation was rolled back.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TilingError {
    /// The requested side count is outside the supported range.
    #[error("cannot build a polygon with {sides} sides (supported: {min}..={max})")]
    InvalidSideCount { sides: usize, min: usize, max: usize },
    /// An edge reference names a polygon that is no longer alive.
    #[error("polygon {0} does not exist")]
    UnknownPolygon(PolygonId),
    /// None of the polygon's edges is reachable from the boundary.
    #[error("polygon {0} has no edge on the boundary; removing it is not supported")]
    NoReachableBoundary(PolygonId),
    /// The polygon's open edges do not form a single ordered run on the boundary.
    #[error("open edges of polygon {0} are not a contiguous run on the boundary")]
    NonContiguousRun(PolygonId),
    /// A closed edge has no partner in the link map.
    #[error("edge {0} is neither open nor linked")]
    MissingLink(EdgeRef),
    /// Attaching would have glued every remaining open edge.
    #[error("attaching here would close the whole boundary")]
    BoundaryExhausted,
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = std::result::Result<T, TilingError>;
