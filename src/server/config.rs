//! Startup configuration for the map server
//!
//! Read from the JSON file named by `MAP_SERVER_CONFIG` when set; every
//! field is optional and falls back to its default.

use crate::draw::geometry::PlacementConfig;
use crate::view::ViewSettings;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_ENV_VAR: &str = "MAP_SERVER_CONFIG";

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub placement: PlacementConfig,
    pub view: ViewSettings,
}

impl ServerConfig {
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(text).context("Failed to parse server config")?;
        Ok(config.sanitized())
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json(&text)
    }

    /// Loads the file named by [`CONFIG_ENV_VAR`], or defaults when it is unset
    pub fn from_env() -> anyhow::Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::from_path(path),
            None => Ok(Self::default()),
        }
    }

    pub fn sanitized(self) -> Self {
        Self {
            placement: self.placement.sanitized(),
            view: self.view.sanitized(),
        }
    }
}
