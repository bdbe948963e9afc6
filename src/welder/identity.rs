//! Identity transform stand-in
//!
//! Returns payloads unchanged and records what it was given, so pipeline
//! tests can assert both the round-trip result and exactly which text
//! reached the tool.

use std::sync::Mutex;

use super::transform::GcodeTransform;
use crate::error::Result;
use crate::settings::WeldOptions;

/// Pass-through transform that records every payload it sees.
#[derive(Default)]
pub struct IdentityWeld {
    seen: Mutex<Vec<String>>,
}

impl IdentityWeld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Payloads handed to `process`, in call order.
    pub fn payloads(&self) -> Vec<String> {
        self.seen.lock().expect("payload lock").clone()
    }

    /// Number of times `process` has been called.
    pub fn calls(&self) -> usize {
        self.seen.lock().expect("payload lock").len()
    }
}

impl GcodeTransform for IdentityWeld {
    fn process(&self, payload: &str, _options: &WeldOptions) -> Result<String> {
        self.seen
            .lock()
            .expect("payload lock")
            .push(payload.to_string());
        Ok(payload.to_string())
    }

    fn name(&self) -> &str {
        "identity"
    }
}
