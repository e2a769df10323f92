//! Viewport transform and screen-space queries over a geometry snapshot
//!
//! Nothing here draws. The presentation layer owns pixels and the y-axis
//! direction; this module only maps `display = data * scale + pan` and back.
//!
//! # Submodules
//! - `viewport` - Scale/pan state, auto-fit and anchored zoom
//! - `pick` - Hit testing a display coordinate against the spatial index
//! - `hover` - Human-readable description of a picked point
//! - `grid` - Grid line placement for the visible area
//! - `settings` - Interaction settings (margins, zoom step, pick radius)

mod grid;
mod hover;
mod pick;
mod settings;
mod viewport;

pub use grid::{grid_lines, GridLines, MAX_GRID_LINES};
pub use hover::describe_point;
pub use pick::{PickHit, PickQuery};
pub use settings::ViewSettings;
pub use viewport::{DisplayPoint, ViewportSize, ViewportTransform};
