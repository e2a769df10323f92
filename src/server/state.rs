//! Server state management for the map server

use super::config::ServerConfig;
use crate::dataset::MeasurementTable;
use crate::draw::generation::{rebuild, rebuild_from_table};
use crate::draw::geometry::{GeometrySnapshot, PlacementConfig};
use crate::error::{ParseWarning, Result};
use crate::mapping::SiteRegistry;
use crate::view::{ViewSettings, ViewportSize, ViewportTransform};
use std::sync::Arc;

/// In-memory state: registry, last raw dataset, current snapshot and view.
///
/// The snapshot is only ever replaced whole, never mutated, so any clone of
/// the `Arc` handed out earlier stays a complete, consistent geometry.
pub struct ServerState {
    pub registry: SiteRegistry,
    pub registry_warnings: Vec<ParseWarning>,
    pub placement: PlacementConfig,
    pub view_settings: ViewSettings,
    /// Last accepted dataset, kept for rebuilds on config or mapping change
    pub table: Option<MeasurementTable>,
    pub snapshot: Arc<GeometrySnapshot>,
    pub viewport: ViewportTransform,
    pub viewport_size: ViewportSize,
}

impl ServerState {
    pub fn new() -> Self {
        Self::with_config(ServerConfig::default())
    }

    pub fn with_config(config: ServerConfig) -> Self {
        let config = config.sanitized();
        Self {
            registry: SiteRegistry::new(),
            registry_warnings: Vec::new(),
            placement: config.placement,
            view_settings: config.view,
            table: None,
            snapshot: Arc::new(GeometrySnapshot::empty(config.placement)),
            viewport: ViewportTransform::new(),
            viewport_size: ViewportSize::default(),
        }
    }

    /// Validates and builds `table`; on success it becomes the retained
    /// dataset. On failure the previous dataset and snapshot stay current.
    pub fn load_dataset(&mut self, table: MeasurementTable) -> Result<Arc<GeometrySnapshot>> {
        let snapshot = rebuild_from_table(&table, &self.registry, &self.placement)?;
        self.table = Some(table);
        Ok(self.install(snapshot))
    }

    /// Rebuilds from the retained dataset with the current registry and placement
    pub fn refresh(&mut self) -> Arc<GeometrySnapshot> {
        let snapshot = match &self.table {
            Some(table) => match rebuild_from_table(table, &self.registry, &self.placement) {
                Ok(snapshot) => snapshot,
                // the retained table was validated when it was loaded
                Err(e) => {
                    log::error!("Rebuild of retained dataset failed: {}", e);
                    return Arc::clone(&self.snapshot);
                }
            },
            None => rebuild(&[], &self.registry, &self.placement),
        };
        self.install(snapshot)
    }

    pub fn set_placement(&mut self, placement: PlacementConfig) -> Arc<GeometrySnapshot> {
        self.placement = placement.sanitized();
        self.refresh()
    }

    pub fn set_registry(&mut self, registry: SiteRegistry, warnings: Vec<ParseWarning>) -> Arc<GeometrySnapshot> {
        self.registry = registry;
        self.registry_warnings = warnings;
        self.refresh()
    }

    /// Fits the view to the snapshot bounds; returns false when there is nothing to fit
    pub fn fit_view(&mut self) -> bool {
        match self.snapshot.bounds() {
            Some(bounds) => {
                self.viewport.auto_fit(bounds, self.viewport_size, self.view_settings.margin_px);
                true
            }
            None => false,
        }
    }

    /// Swaps in a new snapshot and re-fits the view to it
    fn install(&mut self, snapshot: GeometrySnapshot) -> Arc<GeometrySnapshot> {
        self.snapshot = Arc::new(snapshot);
        self.fit_view();
        Arc::clone(&self.snapshot)
    }

    /// Check if a dataset is loaded
    pub fn has_dataset(&self) -> bool {
        self.table.is_some()
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}
