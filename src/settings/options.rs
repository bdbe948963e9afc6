//! Per-invocation weld options
//!
//! A flat, read-only snapshot of the user-facing settings, consumed once
//! per write event. Nothing here is persisted by this crate; the host (or
//! a settings JSON file in CLI use) owns the values.

use serde::{Deserialize, Serialize};

/// Options consumed by one weld invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeldOptions {
    /// Master switch; a disabled invocation is a logged no-op.
    pub enabled: bool,
    /// Maximum arc radius in mm.
    pub maximum_radius: f64,
    /// Path tolerance as a percentage; divided by 100 at flag-build time.
    pub tolerance_percent: f64,
    /// Arc resolution in mm.
    pub resolution: f64,
    /// Minimum segments per full circle the firmware interpolates. Zero or
    /// negative disables firmware compensation flags entirely.
    pub min_arc_segment: i32,
    /// Firmware mm per interpolated arc segment; paired with
    /// `min_arc_segment`.
    pub mm_per_arc_segment: f64,
    /// Emit arcs with Z movement (vase mode).
    pub allow_3d_arcs: bool,
    /// Firmware treats G90/G91 as also switching the extruder mode.
    pub g90_influences_extruder: bool,
}

impl Default for WeldOptions {
    fn default() -> Self {
        // Mirrors the defaults in resources/arcweld_settings.def.json.
        Self {
            enabled: false,
            maximum_radius: 9999.0,
            tolerance_percent: 5.0,
            resolution: 0.05,
            min_arc_segment: 14,
            mm_per_arc_segment: 1.0,
            allow_3d_arcs: false,
            g90_influences_extruder: false,
        }
    }
}

impl WeldOptions {
    /// Defaults with the master switch on, for standalone CLI use where
    /// invoking the command is itself the opt-in.
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }
}
