//! Site-offset map geometry engine
//!
//! Turns per-site offset measurements into plottable polygons: the theory
//! layout of each shot, the offset-applied actual layout of every measured
//! unit, and the per-site mean across units. Points are indexed for nearest
//! lookup and mapped to display space through a zoom/pan viewport.
//!
//! # Module Structure
//! - `mapping` - Site id to (shot, seq) registry
//! - `dataset` - Measurement table validation and typed records
//! - `draw` - Placement, polygon generation and the spatial index
//! - `view` - Viewport transform, picking, hover text and grid lines
//! - `server` - JSON-line request server built on the above

mod cells;
pub mod dataset;
pub mod draw;
pub mod error;
pub mod mapping;
pub mod server;
pub mod view;

pub use dataset::{MeasurementRecord, MeasurementTable, UnitKey};
pub use draw::generation::{rebuild, rebuild_from_table};
pub use draw::geometry::{GeometrySnapshot, MapPoint, PlacementConfig, PointKind, PointMetadata, Polygon, SpatialIndex};
pub use error::{MapError, ParseWarning, Result, WarningKind};
pub use mapping::{SiteAddress, SiteRegistry};
pub use view::{DisplayPoint, PickQuery, ViewportSize, ViewportTransform};
