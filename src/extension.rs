//! Host-facing integration façade
//!
//! Mirrors the lifecycle the host drives: construct once at plugin load
//! (find the tool, fix its permissions, probe its version, parse the
//! bundled settings), register settings when the host's definition
//! container finishes loading, and weld the scene when a write event
//! fires.

use std::path::Path;

use log::{debug, warn};

use crate::codec::{weld_scene, PipelineConfig, WeldSummary};
use crate::error::Result;
use crate::scene::GcodeScene;
use crate::settings::{
    collect_expanded, load_bundled_descriptors, DefinitionContainer, Preferences,
    SettingDescriptor, WeldOptions, SETTINGS_MADE_VISIBLE,
};
use crate::welder::{ArcWelderBinary, GcodeTransform};

/// Category the extension settings are registered under.
pub const PARENT_CATEGORY: &str = "blackmagic";

/// The arc-welding extension.
pub struct ArcWeldExtension {
    binary: ArcWelderBinary,
    descriptors: Vec<SettingDescriptor>,
    config: PipelineConfig,
}

impl ArcWeldExtension {
    /// Set up the extension from its install directory.
    ///
    /// Fails when the settings definitions cannot be parsed, when the
    /// bundled executable is missing, or when the version probe cannot
    /// be executed at all. An unparsable version banner only warns.
    pub fn new(base_dir: &Path) -> Result<Self> {
        let binary = ArcWelderBinary::locate(base_dir)?;
        binary.ensure_executable()?;

        match binary.version()? {
            Some(version) => debug!("Using ArcWelder {}", version),
            None => warn!("Could not determine ArcWelder version"),
        }

        Self::from_binary(binary)
    }

    /// Set up the extension around an already located executable,
    /// skipping the version probe.
    pub fn from_binary(binary: ArcWelderBinary) -> Result<Self> {
        let descriptors = load_bundled_descriptors()?;
        Ok(Self {
            binary,
            descriptors,
            config: PipelineConfig::default(),
        })
    }

    pub fn with_pipeline_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn binary(&self) -> &ArcWelderBinary {
        &self.binary
    }

    pub fn descriptors(&self) -> &[SettingDescriptor] {
        &self.descriptors
    }

    /// React to the host's definition container finishing its load.
    ///
    /// Registers the extension settings under [`PARENT_CATEGORY`] as one
    /// atomic batch, records which of them should start expanded in the
    /// caller-owned accumulator, and promotes the new keys into the
    /// visible-settings list (once per install).
    pub fn on_definitions_loaded(
        &self,
        container: &mut DefinitionContainer,
        preferences: &mut Preferences,
        expanded: &mut Vec<String>,
    ) -> Result<()> {
        let registered =
            container.register_extension(PARENT_CATEGORY, self.descriptors.clone())?;
        collect_expanded(PARENT_CATEGORY, &self.descriptors, expanded);

        preferences.add_default(SETTINGS_MADE_VISIBLE, false);
        preferences.promote_visible_settings(&registered);

        Ok(())
    }

    /// React to the host's write event: weld every plate in the scene.
    ///
    /// A disabled option set is a logged no-op, as is an empty scene.
    pub fn on_write_started(
        &self,
        scene: &mut GcodeScene,
        options: &WeldOptions,
    ) -> WeldSummary {
        if !options.enabled {
            debug!("ArcWelder is not enabled");
            return WeldSummary::default();
        }

        weld_scene(scene, &self.binary, options, &self.config)
    }

    /// Weld a scene through an arbitrary transform, bypassing the bundled
    /// binary. Used by dry runs and tests.
    pub fn weld_with(
        &self,
        scene: &mut GcodeScene,
        transform: &dyn GcodeTransform,
        options: &WeldOptions,
    ) -> WeldSummary {
        if !options.enabled {
            debug!("ArcWelder is not enabled");
            return WeldSummary::default();
        }

        weld_scene(scene, transform, options, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{SettingKind, VISIBLE_SETTINGS};

    fn extension() -> ArcWeldExtension {
        ArcWeldExtension::from_binary(ArcWelderBinary::new("/nonexistent/ArcWelder")).unwrap()
    }

    fn seeded_container() -> DefinitionContainer {
        let mut container = DefinitionContainer::new("fdmprinter");
        container
            .add_category(SettingDescriptor {
                key: PARENT_CATEGORY.to_string(),
                label: "Special Modes".to_string(),
                description: String::new(),
                kind: SettingKind::Bool,
                unit: None,
                default_value: serde_json::json!(false),
                children: Vec::new(),
            })
            .unwrap();
        container
    }

    #[test]
    fn test_definitions_loaded_registers_and_promotes() {
        let extension = extension();
        let mut container = seeded_container();
        let mut preferences = Preferences::new();
        preferences.set(VISIBLE_SETTINGS, "infill_density");
        let mut expanded = vec![PARENT_CATEGORY.to_string()];

        extension
            .on_definitions_loaded(&mut container, &mut preferences, &mut expanded)
            .unwrap();

        assert!(container.contains("arcwelder_enable"));
        assert!(container.contains("arcwelder_g90_influences_extruder"));
        assert!(expanded.contains(&"arcwelder_enable".to_string()));
        assert!(preferences
            .get_string(VISIBLE_SETTINGS)
            .unwrap()
            .contains("arcwelder_tolerance"));
    }

    #[test]
    fn test_write_started_noop_when_disabled() {
        let extension = extension();
        let mut scene = GcodeScene::new();
        scene.insert_plate(
            "0",
            vec!["HDR\n".to_string(), "G1 X0\n".to_string()],
        );

        let summary = extension.on_write_started(&mut scene, &WeldOptions::default());

        assert!(!summary.changed());
        assert_eq!(
            scene.layers("0").unwrap(),
            &vec!["HDR\n".to_string(), "G1 X0\n".to_string()]
        );
    }

    #[test]
    fn test_weld_with_identity_transform() {
        let extension = extension();
        let transform = crate::welder::IdentityWeld::new();
        let mut scene = GcodeScene::new();
        scene.insert_plate(
            "0",
            vec![
                "HDR\n".to_string(),
                "G1 X0\n".to_string(),
                "G1 X1\n".to_string(),
            ],
        );

        let summary = extension.weld_with(&mut scene, &transform, &WeldOptions::enabled());

        assert!(summary.changed());
        assert!(scene.layers("0").unwrap()[0].contains(";ARCWELDERPROCESSED\n"));
    }
}
