//! In-memory scene representation
//!
//! The per-plate mapping from plate id to ordered layer sequence, as
//! handed over by the host when a write event fires. The CLI round-trips
//! the same structure through JSON files.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Plate id -> ordered layer sequence.
///
/// A document without a plate map deserializes to an empty scene; the
/// pipeline treats both the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GcodeScene {
    #[serde(default)]
    plates: BTreeMap<String, Vec<String>>,
}

impl GcodeScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the scene holds any plates at all.
    pub fn is_empty(&self) -> bool {
        self.plates.is_empty()
    }

    /// Plate ids in deterministic order.
    pub fn plate_ids(&self) -> Vec<String> {
        self.plates.keys().cloned().collect()
    }

    /// Layers of one plate.
    pub fn layers(&self, plate_id: &str) -> Option<&Vec<String>> {
        self.plates.get(plate_id)
    }

    /// Insert or replace a plate.
    pub fn insert_plate(&mut self, plate_id: impl Into<String>, layers: Vec<String>) {
        self.plates.insert(plate_id.into(), layers);
    }

    /// Replace the layer sequence of an existing plate.
    pub fn replace_layers(&mut self, plate_id: &str, layers: Vec<String>) {
        if let Some(existing) = self.plates.get_mut(plate_id) {
            *existing = layers;
        }
    }

    /// Load a scene from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let scene = serde_json::from_str(&content)?;
        Ok(scene)
    }

    /// Save the scene to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
