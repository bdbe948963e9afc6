//! Layer round-trip codec
//!
//! This module provides:
//! - Sentinel-based join/split of per-plate layer sequences
//! - The processed-marker idempotence check
//! - The per-plate pipeline and batch driver over a scene

mod pipeline;
mod roundtrip;

pub use pipeline::{weld_plate, weld_scene, FailurePolicy, PipelineConfig, PlateStatus, WeldSummary};
pub use roundtrip::{decode, encode, is_processed, EncodedPlate, LAYER_SEPARATOR, PROCESSED_MARKER};
