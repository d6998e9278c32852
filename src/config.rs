use crate::graph::EdgePolicy;
use crate::grid::GRID_SIZE;
use crate::viewport::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, DEFAULT_ZOOM_STEP};
use serde::{Deserialize, Serialize};

/// Tunables for a [`CanvasSession`](crate::session::CanvasSession).
///
/// Missing fields fall back to their defaults when deserializing, so a host
/// can ship a partial JSON/TOML file:
///
/// ```ignore
/// let config: CanvasConfig = serde_json::from_str(r#"{ "grid_size": 24 }"#)?;
/// let session = CanvasSession::with_config(config);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Grid cell in logical units (default: 20)
    pub grid_size: i32,
    /// Lower zoom bound (default: 0.3)
    pub min_zoom: f32,
    /// Upper zoom bound (default: 3.0)
    pub max_zoom: f32,
    /// Factor applied per zoom step (default: 1.2)
    pub zoom_step: f32,
    /// Connection admission rules (default: strict)
    pub edge_policy: EdgePolicy,
    /// Re-run validation after every graph mutation (default: true)
    pub auto_validate: bool,
    /// Initial grid visibility (default: true)
    pub show_grid: bool,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            zoom_step: DEFAULT_ZOOM_STEP,
            edge_policy: EdgePolicy::Strict,
            auto_validate: true,
            show_grid: true,
        }
    }
}

impl CanvasConfig {
    pub fn with_grid_size(mut self, grid_size: i32) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub fn with_zoom_limits(mut self, min_zoom: f32, max_zoom: f32) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self
    }

    pub fn with_zoom_step(mut self, zoom_step: f32) -> Self {
        self.zoom_step = zoom_step;
        self
    }

    pub fn with_edge_policy(mut self, edge_policy: EdgePolicy) -> Self {
        self.edge_policy = edge_policy;
        self
    }

    pub fn with_auto_validate(mut self, auto_validate: bool) -> Self {
        self.auto_validate = auto_validate;
        self
    }
}
