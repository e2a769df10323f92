//! Site mapping: site id to placement address (shot, seq)
//!
//! # Submodules
//! - `registry` - The site registry and its loaders

mod registry;

pub use registry::{RegistryLoad, SiteAddress, SiteRegistry};
