//! Arcweld - G-code Arc-Welding Integration Layer
//!
//! Arcweld bridges a slicer's per-plate G-code output and the external
//! ArcWelder console tool, which replaces runs of straight-line moves
//! with G2/G3 arc commands. The crate contains no arc-fitting logic of
//! its own: it flattens layer sequences through a sentinel-separated
//! stream, hands the stream to the tool over a scoped temporary file,
//! splices the rewritten stream back into the scene, and marks plates so
//! repeated write events are no-ops.
//!
//! # Architecture
//!
//! - `codec`: sentinel round-trip and the per-plate/batch pipeline
//! - `welder`: the external tool seam and its implementations
//! - `settings`: weld options, definition registration, preferences
//! - `scene`: the per-plate layer mapping handed over by the host
//! - `extension`: the host-facing lifecycle façade

pub mod cli;
pub mod codec;
pub mod error;
pub mod extension;
pub mod scene;
pub mod settings;
pub mod welder;

// Re-export commonly used types
pub use error::{ArcWeldError, Result};
pub use extension::ArcWeldExtension;
pub use scene::GcodeScene;
pub use settings::WeldOptions;
