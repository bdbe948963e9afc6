//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use walkdir::WalkDir;

use crate::codec::{weld_scene, FailurePolicy, PipelineConfig, WeldSummary};
use crate::error::Result;
use crate::extension::ArcWeldExtension;
use crate::scene::GcodeScene;
use crate::settings::{load_bundled_descriptors, SettingDescriptor, WeldOptions};
use crate::welder::{ArcWelderBinary, IdentityWeld};

/// Weld one scene file or every scene file under a directory.
#[allow(clippy::too_many_arguments)]
pub fn process(
    scene_path: &Path,
    settings: Option<&Path>,
    tool_dir: &Path,
    output: Option<&Path>,
    keep_header: bool,
    abort_on_error: bool,
    dry_run: bool,
) -> Result<()> {
    let options = load_options(settings)?;
    if !options.enabled {
        println!("Arc welding is not enabled in the provided settings");
        return Ok(());
    }

    let config = PipelineConfig {
        extract_header: !keep_header,
        failure_policy: if abort_on_error {
            FailurePolicy::Abort
        } else {
            FailurePolicy::Continue
        },
    };

    let scene_files = collect_scene_files(scene_path)?;
    if scene_files.is_empty() {
        println!("No scene files found under {}", scene_path.display());
        return Ok(());
    }
    if output.is_some() && scene_files.len() > 1 {
        warn!("--output is ignored when processing a directory");
    }

    // Dry runs never touch the executable; real runs locate and probe it
    // once for the whole batch.
    let extension = if dry_run {
        None
    } else {
        Some(ArcWeldExtension::new(tool_dir)?.with_pipeline_config(config.clone()))
    };

    for path in &scene_files {
        info!("Processing scene {}", path.display());
        let mut scene = GcodeScene::load(path)?;

        let summary = match &extension {
            Some(extension) => extension.on_write_started(&mut scene, &options),
            None => {
                let identity = IdentityWeld::new();
                let mut preview = scene.clone();
                weld_scene(&mut preview, &identity, &options, &config)
            }
        };

        report(path, &summary, dry_run);

        if !dry_run && summary.changed() {
            let target = match (output, scene_files.len()) {
                (Some(output), 1) => output.to_path_buf(),
                _ => path.clone(),
            };
            scene.save(&target)?;
            println!("Saved: {}", target.display());
        }
    }

    Ok(())
}

/// Query and print the bundled tool version.
pub fn version(tool_dir: &Path) -> Result<()> {
    let binary = ArcWelderBinary::locate(tool_dir)?;
    binary.ensure_executable()?;

    match binary.version()? {
        Some(version) => println!("ArcWelder {}", version),
        None => println!("Could not determine ArcWelder version"),
    }

    Ok(())
}

/// Print the settings definition tree.
pub fn definitions() -> Result<()> {
    let descriptors = load_bundled_descriptors()?;
    for descriptor in &descriptors {
        print_descriptor(descriptor, 0);
    }
    Ok(())
}

fn load_options(settings: Option<&Path>) -> Result<WeldOptions> {
    match settings {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            let options = serde_json::from_str(&content)?;
            Ok(options)
        }
        // invoking the CLI is the opt-in, so the master switch is on
        None => Ok(WeldOptions::enabled()),
    }
}

fn collect_scene_files(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    Ok(files)
}

fn report(path: &Path, summary: &WeldSummary, dry_run: bool) {
    let verb = if dry_run { "Would weld" } else { "Welded" };
    println!(
        "{}: {} {} plate(s), skipped {}, failed {}",
        path.display(),
        verb,
        summary.processed.len(),
        summary.skipped.len(),
        summary.failed.len()
    );

    for (plate_id, error) in &summary.failed {
        println!("  plate {}: {}", plate_id, error);
    }
}

fn print_descriptor(descriptor: &SettingDescriptor, depth: usize) {
    let indent = "  ".repeat(depth);
    let unit = descriptor
        .unit
        .as_deref()
        .map(|unit| format!(" [{}]", unit))
        .unwrap_or_default();

    println!(
        "{}{} ({}){} - {} (default: {})",
        indent,
        descriptor.key,
        descriptor.kind.as_str(),
        unit,
        descriptor.label,
        descriptor.default_value
    );

    for child in &descriptor.children {
        print_descriptor(child, depth + 1);
    }
}
