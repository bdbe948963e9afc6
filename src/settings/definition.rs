//! Setting descriptors and the bundled definition document
//!
//! Descriptors are the schema nodes handed to the host's definition
//! container at registration time. The bundled JSON document uses arrays
//! for children so their order is explicit.

use serde::{Deserialize, Serialize};

use crate::error::{ArcWeldError, Result};

/// The bundled settings definition document.
pub const DEFINITIONS_JSON: &str = include_str!("../../resources/arcweld_settings.def.json");

/// Value kind of a setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingKind {
    Bool,
    Float,
    Int,
}

impl SettingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Float => "float",
            Self::Int => "int",
        }
    }
}

/// Schema node describing one user-facing setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingDescriptor {
    pub key: String,
    pub label: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: SettingKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub default_value: serde_json::Value,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SettingDescriptor>,
}

impl SettingDescriptor {
    /// Keys of this descriptor and all of its descendants, depth first.
    pub fn all_keys(&self) -> Vec<&str> {
        let mut keys = vec![self.key.as_str()];
        for child in &self.children {
            keys.extend(child.all_keys());
        }
        keys
    }
}

#[derive(Deserialize)]
struct DefinitionDocument {
    settings: Vec<SettingDescriptor>,
}

/// Parse a definition document into descriptors.
pub fn parse_descriptors(document: &str) -> Result<Vec<SettingDescriptor>> {
    let document: DefinitionDocument =
        serde_json::from_str(document).map_err(|e| ArcWeldError::ConfigurationLoad {
            reason: e.to_string(),
        })?;
    Ok(document.settings)
}

/// Parse the bundled definition document.
pub fn load_bundled_descriptors() -> Result<Vec<SettingDescriptor>> {
    parse_descriptors(DEFINITIONS_JSON)
}
