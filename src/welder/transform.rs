//! Transform trait for G-code streams
//!
//! The seam between the pipeline and the external tool. Implementations
//! are pure functions from (payload, options) to a rewritten payload; the
//! pipeline never interprets the output beyond treating it as replacement
//! text.

use crate::error::Result;
use crate::settings::WeldOptions;

/// A line-oriented transformation applied to a flattened layer stream.
pub trait GcodeTransform {
    /// Transform the payload and return the rewritten text.
    ///
    /// # Arguments
    /// * `payload` - Joined layer stream as produced by the codec
    /// * `options` - Per-invocation weld options, read-only
    fn process(&self, payload: &str, options: &WeldOptions) -> Result<String>;

    /// Check if the transform is ready to use
    fn is_available(&self) -> bool {
        true
    }

    /// Short name for log records
    fn name(&self) -> &str;
}
