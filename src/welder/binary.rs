//! Subprocess bridge to the bundled ArcWelder executable
//!
//! The tool rewrites its input file in place. Each invocation gets its own
//! scoped temp file: written immediately before the call, read back
//! immediately after, and removed when the guard drops — including on
//! every error path.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, warn};
use regex::Regex;
use tempfile::NamedTempFile;

use super::args::command_arguments;
use super::transform::GcodeTransform;
use crate::error::{ArcWeldError, Result};
use crate::settings::WeldOptions;

/// Environment variable overriding the bundled executable path.
pub const EXECUTABLE_ENV: &str = "ARCWELD_EXECUTABLE";

/// Relative path of the bundled executable for the current platform.
fn platform_relative_path() -> &'static str {
    if cfg!(target_os = "windows") {
        "bin/win64/ArcWelder.exe"
    } else if cfg!(target_os = "macos") {
        "bin/osx/ArcWelder"
    } else {
        "bin/linux/ArcWelder"
    }
}

/// Handle to the external ArcWelder console tool.
pub struct ArcWelderBinary {
    path: PathBuf,
}

impl ArcWelderBinary {
    /// Wrap an executable at a known path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Locate the bundled executable under `base_dir`.
    ///
    /// `ARCWELD_EXECUTABLE` overrides the bundled copy, mirroring how the
    /// rest of the toolchain is relocatable in CI.
    pub fn locate(base_dir: &Path) -> Result<Self> {
        let path = match std::env::var(EXECUTABLE_ENV) {
            Ok(path) => PathBuf::from(path),
            Err(_) => base_dir.join(platform_relative_path()),
        };

        if !path.is_file() {
            return Err(ArcWeldError::ExternalTool {
                reason: format!("executable not found at {}", path.display()),
            });
        }

        Ok(Self { path })
    }

    /// Path of the wrapped executable.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Make sure the bundled binary carries execute permission.
    ///
    /// Plugin archives are unpacked without preserving the execute bit on
    /// some hosts.
    #[cfg(unix)]
    pub fn ensure_executable(&self) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        fs::set_permissions(&self.path, fs::Permissions::from_mode(0o744))?;
        Ok(())
    }

    #[cfg(not(unix))]
    pub fn ensure_executable(&self) -> Result<()> {
        Ok(())
    }

    /// Query the tool version string.
    ///
    /// The tool prints a banner containing `version: <x>`; the captured
    /// group is returned. `None` when the banner is present but does not
    /// match, so callers can log a warning instead of failing startup.
    pub fn version(&self) -> Result<Option<String>> {
        let output = Command::new(&self.path)
            .arg("--version")
            .output()
            .map_err(|e| ArcWeldError::ExternalTool {
                reason: format!("could not run {} --version: {}", self.path.display(), e),
            })?;

        if !output.status.success() {
            return Err(ArcWeldError::ExternalTool {
                reason: format!("--version exited with {}", output.status),
            });
        }

        let banner = String::from_utf8_lossy(&output.stdout);
        let pattern = Regex::new("version: (.*)").expect("static pattern");

        Ok(pattern
            .captures(&banner)
            .and_then(|captures| captures.get(1))
            .map(|group| group.as_str().trim().to_string()))
    }
}

impl GcodeTransform for ArcWelderBinary {
    fn process(&self, payload: &str, options: &WeldOptions) -> Result<String> {
        let mut temporary = NamedTempFile::new()?;
        temporary.write_all(payload.as_bytes())?;
        temporary.flush()?;

        debug!("Using temporary file {}", temporary.path().display());

        let arguments = command_arguments(options, temporary.path());
        debug!("Running ArcWelder with the following options: {:?}", arguments);

        let output = Command::new(&self.path)
            .args(&arguments)
            .output()
            .map_err(|e| ArcWeldError::ExternalTool {
                reason: format!("could not run {}: {}", self.path.display(), e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ArcWeldError::ExternalTool {
                reason: format!("exited with {}: {}", output.status, stderr.trim()),
            });
        }

        debug!("{}", String::from_utf8_lossy(&output.stdout));

        // The tool rewrote the file in place; its content is the result.
        let rewritten = fs::read_to_string(temporary.path())?;
        Ok(rewritten)
    }

    fn is_available(&self) -> bool {
        if !self.path.is_file() {
            return false;
        }
        match self.version() {
            Ok(Some(_)) => true,
            Ok(None) => {
                warn!("Could not determine ArcWelder version");
                true
            }
            Err(_) => false,
        }
    }

    fn name(&self) -> &str {
        "ArcWelder"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_missing_binary() {
        let dir = tempfile::tempdir().unwrap();
        let result = ArcWelderBinary::locate(dir.path());

        match result {
            Err(ArcWeldError::ExternalTool { reason }) => {
                assert!(reason.contains("not found"), "unexpected reason: {}", reason);
            }
            _ => panic!("expected ExternalTool error"),
        }
    }

    #[test]
    fn test_locate_bundled_binary() {
        let dir = tempfile::tempdir().unwrap();
        let bundled = dir.path().join(platform_relative_path());
        fs::create_dir_all(bundled.parent().unwrap()).unwrap();
        fs::write(&bundled, b"#!/bin/sh\n").unwrap();

        let binary = ArcWelderBinary::locate(dir.path()).unwrap();
        assert_eq!(binary.path(), bundled);
    }

    #[test]
    fn test_process_fails_when_executable_missing() {
        let binary = ArcWelderBinary::new("/nonexistent/ArcWelder");
        let options = WeldOptions::enabled();

        let result = binary.process("G1 X0\n", &options);
        assert!(matches!(result, Err(ArcWeldError::ExternalTool { .. })));
        assert!(!binary.is_available());
    }

    #[cfg(unix)]
    #[test]
    fn test_ensure_executable_sets_execute_bit() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ArcWelder");
        fs::write(&path, b"#!/bin/sh\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).unwrap();

        let binary = ArcWelderBinary::new(&path);
        binary.ensure_executable().unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o744);
    }
}
