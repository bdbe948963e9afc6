//! Error handling for Arcweld
//!
//! Per-plate failures are logged and surfaced through these types; they
//! must never abort the host process.

use thiserror::Error;

/// Result type alias for Arcweld operations
pub type Result<T> = std::result::Result<T, ArcWeldError>;

/// Main error type for Arcweld operations
#[derive(Error, Debug)]
pub enum ArcWeldError {
    /// Settings definition data unavailable or unparsable. Registration is
    /// skipped entirely when this occurs.
    #[error("Could not load settings definitions: {reason}")]
    ConfigurationLoad { reason: String },

    /// The ArcWelder executable is missing, not executable, or exited
    /// with a non-zero status.
    #[error("ArcWelder invocation failed: {reason}")]
    ExternalTool { reason: String },

    /// The transformed stream split into a different number of layers than
    /// were joined. The plate is left unmodified when this is raised.
    #[error("Layer count mismatch for plate {plate}: joined {expected}, got {actual} back")]
    DataIntegrity {
        plate: String,
        expected: usize,
        actual: usize,
    },

    /// Registration batch referenced a parent setting that does not exist.
    #[error("Parent setting not found: {key}")]
    UnknownParent { key: String },

    /// Registration batch would insert a key that is already defined.
    #[error("Setting already defined: {key}")]
    DuplicateSetting { key: String },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ArcWeldError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            ArcWeldError::ConfigurationLoad { .. } => "CONFIGURATION_LOAD",
            ArcWeldError::ExternalTool { .. } => "EXTERNAL_TOOL",
            ArcWeldError::DataIntegrity { .. } => "DATA_INTEGRITY",
            ArcWeldError::UnknownParent { .. } => "UNKNOWN_PARENT",
            ArcWeldError::DuplicateSetting { .. } => "DUPLICATE_SETTING",
            ArcWeldError::Io(_) => "IO_ERROR",
            ArcWeldError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Whether this error should stop plugin initialization rather than a
    /// single plate.
    pub fn is_fatal_to_init(&self) -> bool {
        matches!(self, ArcWeldError::ConfigurationLoad { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = ArcWeldError::ExternalTool {
            reason: "exit status 1".to_string(),
        };
        assert_eq!(err.error_code(), "EXTERNAL_TOOL");

        let err = ArcWeldError::DataIntegrity {
            plate: "0".to_string(),
            expected: 5,
            actual: 3,
        };
        assert_eq!(err.error_code(), "DATA_INTEGRITY");
    }

    #[test]
    fn test_init_fatality() {
        let err = ArcWeldError::ConfigurationLoad {
            reason: "bad json".to_string(),
        };
        assert!(err.is_fatal_to_init());

        let err = ArcWeldError::ExternalTool {
            reason: "missing".to_string(),
        };
        assert!(!err.is_fatal_to_init());
    }
}
