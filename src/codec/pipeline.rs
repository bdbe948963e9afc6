//! Per-plate weld pipeline and batch driver
//!
//! One plate is processed at a time, synchronously: skip checks, encode,
//! external transform, decode, layer-count verification, replace. A plate
//! that fails anywhere along the way keeps its original layers.

use log::{debug, error, info, warn};

use super::roundtrip::{decode, encode, is_processed};
use crate::error::{ArcWeldError, Result};
use crate::scene::GcodeScene;
use crate::settings::WeldOptions;
use crate::welder::GcodeTransform;

/// What to do with the rest of the batch when one plate fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Log the failure and keep going with the remaining plates.
    #[default]
    Continue,
    /// Record the failure and stop the batch.
    Abort,
}

/// Pipeline behavior knobs.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Hold the first layer back from the external tool and reattach it
    /// afterward. On by default; slicer headers must not reach the tool.
    pub extract_header: bool,
    pub failure_policy: FailurePolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            extract_header: true,
            failure_policy: FailurePolicy::Continue,
        }
    }
}

/// Outcome of running the pipeline on a single plate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlateStatus {
    /// Layers were transformed and replaced.
    Welded(Vec<String>),
    /// Fewer than two layers; header-only output carries no geometry.
    TooFewLayers,
    /// The processed marker is already present.
    AlreadyProcessed,
}

/// Batch result over a scene.
#[derive(Debug, Default)]
pub struct WeldSummary {
    pub processed: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<(String, ArcWeldError)>,
}

impl WeldSummary {
    /// Whether anything in the scene was modified.
    pub fn changed(&self) -> bool {
        !self.processed.is_empty()
    }
}

/// Run the pipeline on one plate's layers.
///
/// Returns the replacement layers on success, a skip status when the
/// plate is ineligible, or an error with the original layers untouched.
pub fn weld_plate(
    plate_id: &str,
    layers: &[String],
    transform: &dyn GcodeTransform,
    options: &WeldOptions,
    extract_header: bool,
) -> Result<PlateStatus> {
    if layers.len() < 2 {
        warn!("Plate {} does not contain any layers", plate_id);
        return Ok(PlateStatus::TooFewLayers);
    }

    if is_processed(layers) {
        debug!("Plate {} has already been processed", plate_id);
        return Ok(PlateStatus::AlreadyProcessed);
    }

    let encoded = encode(layers, extract_header);
    let transformed = transform.process(&encoded.payload, options)?;
    let welded = decode(&transformed, encoded.header);

    if welded.len() != layers.len() {
        return Err(ArcWeldError::DataIntegrity {
            plate: plate_id.to_string(),
            expected: layers.len(),
            actual: welded.len(),
        });
    }

    Ok(PlateStatus::Welded(welded))
}

/// Run the pipeline over every plate in the scene.
///
/// Plates are visited in deterministic id order. Failures are logged and
/// recorded; whether they stop the batch is governed by the configured
/// [`FailurePolicy`]. An empty scene is a logged no-op.
pub fn weld_scene(
    scene: &mut GcodeScene,
    transform: &dyn GcodeTransform,
    options: &WeldOptions,
    config: &PipelineConfig,
) -> WeldSummary {
    let mut summary = WeldSummary::default();

    if scene.is_empty() {
        warn!("Scene has no gcode to process");
        return summary;
    }

    for plate_id in scene.plate_ids() {
        let layers = match scene.layers(&plate_id) {
            Some(layers) => layers,
            None => continue,
        };

        match weld_plate(&plate_id, layers, transform, options, config.extract_header) {
            Ok(PlateStatus::Welded(welded)) => {
                scene.replace_layers(&plate_id, welded);
                info!("Welded plate {} with {}", plate_id, transform.name());
                summary.processed.push(plate_id);
            }
            Ok(_) => {
                summary.skipped.push(plate_id);
            }
            Err(e) => {
                error!("Failed to weld plate {}: {}", plate_id, e);
                summary.failed.push((plate_id, e));
                if config.failure_policy == FailurePolicy::Abort {
                    break;
                }
            }
        }
    }

    summary
}
