//! Map server module - JSON line protocol around the geometry core
//!
//! Holds the last raw dataset, the site registry and the current geometry
//! snapshot, and answers requests from a presentation process.
//!
//! # Module Structure
//! - `protocol` - Request/response types and error codes
//! - `state` - Server state and the snapshot-replace rebuild
//! - `config` - Startup configuration
//! - `util` - Parameter parsing helpers
//! - `handlers` - Request handlers organized by functionality

pub mod config;
pub mod handlers;
pub mod protocol;
pub mod state;
pub mod util;

// Re-export key types for convenience
pub use config::ServerConfig;
pub use handlers::handle_request;
pub use protocol::{error_codes, ErrorResponse, Request, Response};
pub use state::ServerState;
