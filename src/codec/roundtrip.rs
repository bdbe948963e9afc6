//! Sentinel join/split of layer sequences
//!
//! Layers are opaque text blocks; nothing here parses G-code. The sentinel
//! is a comment line that cannot occur in slicer output, so joining and
//! splitting on it round-trips layer boundaries exactly.

/// Separator line inserted between layers in the flattened stream.
pub const LAYER_SEPARATOR: &str = ";ARCWELDERPLUGIN_GCODELIST_SEPARATOR\n";

/// Marker appended to a plate's first layer once it has been welded.
pub const PROCESSED_MARKER: &str = ";ARCWELDERPROCESSED\n";

/// A plate flattened for the external tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPlate {
    /// First layer, held back from the tool when extraction is enabled.
    pub header: Option<String>,
    /// Remaining layers joined with [`LAYER_SEPARATOR`].
    pub payload: String,
    /// Number of layers that went into `payload`.
    pub joined_count: usize,
}

/// Flatten a layer sequence into a single payload for the external tool.
///
/// With `extract_header` the first layer is removed and returned separately
/// so its content is never exposed to the tool; otherwise all layers are
/// joined. Callers must have checked `layers.len() >= 2` already — shorter
/// plates carry no real geometry and are skipped upstream.
pub fn encode(layers: &[String], extract_header: bool) -> EncodedPlate {
    debug_assert!(layers.len() >= 2, "plates with fewer than 2 layers are skipped before encode");

    let (header, body) = if extract_header {
        (Some(layers[0].clone()), &layers[1..])
    } else {
        (None, layers)
    };

    EncodedPlate {
        header,
        payload: body.join(LAYER_SEPARATOR),
        joined_count: body.len(),
    }
}

/// Split a transformed payload back into layers.
///
/// Reinserts the header (if one was extracted) as the new first element,
/// then appends [`PROCESSED_MARKER`] to the end of the first element. The
/// append preserves whatever the first element already holds, so header
/// content survives alongside the marker.
pub fn decode(transformed: &str, header: Option<String>) -> Vec<String> {
    let mut layers: Vec<String> = transformed
        .split(LAYER_SEPARATOR)
        .map(str::to_string)
        .collect();

    if let Some(header) = header {
        layers.insert(0, header);
    }

    if let Some(first) = layers.first_mut() {
        first.push_str(PROCESSED_MARKER);
    }

    layers
}

/// Whether a plate has already been welded.
///
/// True iff the first layer contains [`PROCESSED_MARKER`] anywhere. Checked
/// before the pipeline runs so repeated write events are no-ops.
pub fn is_processed(layers: &[String]) -> bool {
    layers
        .first()
        .map_or(false, |first| first.contains(PROCESSED_MARKER))
}
