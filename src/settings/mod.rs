//! Settings for the arc-welding integration
//!
//! This module provides:
//! - `WeldOptions`: the flat per-invocation option set handed to the tool
//! - Setting descriptors parsed from the bundled definition document
//! - `DefinitionContainer` with atomic batch extension registration
//! - `Preferences` with one-shot visible-settings promotion

mod container;
mod definition;
mod options;
mod preferences;

pub use container::{collect_expanded, DefinitionContainer};
pub use definition::{
    load_bundled_descriptors, parse_descriptors, SettingDescriptor, SettingKind, DEFINITIONS_JSON,
};
pub use options::WeldOptions;
pub use preferences::{Preferences, SETTINGS_MADE_VISIBLE, VISIBLE_SETTINGS};
