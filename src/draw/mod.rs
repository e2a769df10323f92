//! Geometry construction and spatial queries
//!
//! # Submodules
//! - `geometry` - Point/polygon types, placement, spatial index and snapshot
//! - `generation` - The passes that turn records into a geometry snapshot

pub mod generation;
pub mod geometry;
