//! Geometry module for site offset maps
//!
//! # Submodules
//! - `types` - Core geometric primitives (MapPoint, Polygon, Bounds, metadata)
//! - `placement` - Placement configuration and the design-to-plot formula
//! - `spatial` - R-tree nearest-point index over plotted points
//! - `snapshot` - Immutable result of one geometry build

mod placement;
mod snapshot;
mod spatial;
mod types;

pub use types::{
    ActualPoint,
    Bounds,
    MapPoint,
    MeanPoint,
    PlottedPoint,
    PointKind,
    PointMetadata,
    Polygon,
    ShotMap,
    TheoryPoint,
};

pub use placement::{
    place,
    place_with_offset,
    PlacementConfig,
};

pub use spatial::{
    IndexedPoint,
    NearestHit,
    SpatialIndex,
};

pub use snapshot::{GeometrySnapshot, SnapshotSummary};
