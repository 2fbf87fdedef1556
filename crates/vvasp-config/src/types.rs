// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! Every struct maps to a section of `vvasp_configuration.toml`. All sections
//! are optional in the file; anything left out takes the default below.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use vvasp_structures::{
    builtin_atlas_transformations, AtlasTransformation, MovementCommand, ProbeCatalogue,
    UnknownDirectionPolicy,
};

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct VvaspConfig {
    pub system: SystemConfig,
    pub paths: PathsConfig,
    pub atlas: AtlasConfig,
    /// Probe types added to (or replacing) the built-in catalogue
    pub probes: ProbeCatalogue,
    pub movement: MovementConfig,
    pub logging: LoggingConfig,
}

impl Default for VvaspConfig {
    fn default() -> Self {
        Self {
            system: SystemConfig::default(),
            paths: PathsConfig::default(),
            atlas: AtlasConfig::default(),
            probes: ProbeCatalogue::empty(),
            movement: MovementConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl VvaspConfig {
    /// Built-in probe types with the configured ones merged over them.
    pub fn probe_catalogue(&self) -> ProbeCatalogue {
        let mut catalogue = ProbeCatalogue::builtin();
        catalogue.merge(self.probes.clone());
        catalogue
    }

    /// Placement of `atlas_name` in bregma space, if configured.
    pub fn atlas_transformation(&self, atlas_name: &str) -> Option<&AtlasTransformation> {
        self.atlas.transformations.get(atlas_name)
    }

    /// Acronym list of a named region mapping.
    pub fn mapping_acronyms(&self, mapping: &str) -> Option<Vec<String>> {
        self.atlas.mappings.get(mapping).cloned()
    }
}

/// System-level configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SystemConfig {
    pub log_level: String,
    pub debug: bool,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            debug: false,
        }
    }
}

/// Where experiments, exports, atlases and user meshes live
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PathsConfig {
    pub experiment_dir: PathBuf,
    pub export_dir: PathBuf,
    /// Root of the installed brainglobe atlases
    pub atlas_dir: PathBuf,
    pub user_mesh_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            experiment_dir: PathBuf::from("vvasp/experiments"),
            export_dir: PathBuf::from("vvasp/exports"),
            atlas_dir: PathBuf::from(".brainglobe"),
            user_mesh_dir: PathBuf::from("vvasp/custom_user_meshes"),
        }
    }
}

/// Atlas selection and per-atlas placement
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AtlasConfig {
    pub default_atlas: String,
    pub default_mapping: Option<String>,
    /// Per-atlas bregma location (voxels), angles, scaling and rotation order
    pub transformations: BTreeMap<String, AtlasTransformation>,
    /// Named region mappings: mapping name -> acronyms
    pub mappings: BTreeMap<String, Vec<String>>,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            default_atlas: "allen_mouse_25um".to_string(),
            default_mapping: None,
            transformations: builtin_atlas_transformations(),
            mappings: BTreeMap::new(),
        }
    }
}

/// One key binding: a movement command and its magnitude
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Keybind(pub MovementCommand, pub f64);

/// Movement behaviour and key bindings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MovementConfig {
    pub unknown_direction: UnknownDirectionPolicy,
    /// Truncate advance/retract steps to whole µm
    pub advance_truncates: bool,
    /// Key chord (e.g. `Ctrl+Shift+a`) -> movement
    pub keybinds: BTreeMap<String, Keybind>,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            unknown_direction: UnknownDirectionPolicy::Ignore,
            advance_truncates: true,
            keybinds: default_keybinds(),
        }
    }
}

fn default_keybinds() -> BTreeMap<String, Keybind> {
    use MovementCommand::*;
    let table = [
        ("a", Left, 100.0),
        ("d", Right, 100.0),
        ("f", Dorsal, 100.0),
        ("c", Ventral, 100.0),
        ("w", Anterior, 100.0),
        ("s", Posterior, 100.0),
        ("h", Home, 0.0),
        ("Ctrl+a", Left, 10.0),
        ("Ctrl+d", Right, 10.0),
        ("Ctrl+f", Dorsal, 10.0),
        ("Ctrl+c", Ventral, 10.0),
        ("Ctrl+w", Anterior, 10.0),
        ("Ctrl+s", Posterior, 10.0),
        ("Shift+a", RotateLeft, 5.0),
        ("Shift+d", RotateRight, 5.0),
        ("Shift+w", TiltDown, 5.0),
        ("Shift+s", TiltUp, 5.0),
        ("Ctrl+Shift+a", RotateLeft, 1.0),
        ("Ctrl+Shift+d", RotateRight, 1.0),
        ("Ctrl+Shift+w", TiltDown, 1.0),
        ("Ctrl+Shift+s", TiltUp, 1.0),
        ("q", SpinLeft, 5.0),
        ("e", SpinRight, 5.0),
        ("Ctrl+q", SpinLeft, 1.0),
        ("Ctrl+e", SpinRight, 1.0),
        ("Shift+f", Retract, 100.0),
        ("Shift+c", Advance, 100.0),
        ("Ctrl+Shift+f", Retract, 10.0),
        ("Ctrl+Shift+c", Advance, 10.0),
    ];
    table
        .into_iter()
        .map(|(key, command, magnitude)| (key.to_string(), Keybind(command, magnitude)))
        .collect()
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
    pub file_logging: bool,
    pub log_dir: PathBuf,
    pub retention_days: u64,
    pub retention_runs: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Text,
            file_logging: false,
            log_dir: PathBuf::from("./logs"),
            retention_days: 30,
            retention_runs: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = VvaspConfig::default();
        assert_eq!(config.atlas.default_atlas, "allen_mouse_25um");
        let allen = config.atlas_transformation("allen_mouse_25um").unwrap();
        assert_eq!(allen.bregma_location, [216.0, 18.0, 228.0]);
        assert_eq!(allen.angles, [90.0, -5.0, 90.0]);
        assert!(config.probes.is_empty());
        assert!(config.probe_catalogue().contains("utah10x10"));
        assert_eq!(config.movement.keybinds["Shift+c"], Keybind(MovementCommand::Advance, 100.0));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: VvaspConfig = toml::from_str(
            r#"
            [atlas]
            default_atlas = "whs_sd_rat_39um"

            [atlas.mappings]
            cortex = ["CTX", "HPF"]

            [movement]
            unknown_direction = "reject"

            [movement.keybinds]
            "x" = ["tilt up", 2.5]
            "#,
        )
        .unwrap();
        assert_eq!(config.atlas.default_atlas, "whs_sd_rat_39um");
        assert_eq!(config.mapping_acronyms("cortex").unwrap(), ["CTX", "HPF"]);
        assert_eq!(config.movement.unknown_direction, UnknownDirectionPolicy::Reject);
        assert_eq!(config.movement.keybinds["x"], Keybind(MovementCommand::TiltUp, 2.5));
        assert_eq!(config.movement.keybinds.len(), 1);
        assert!(config.movement.advance_truncates);
        assert_eq!(config.logging.retention_runs, 10);
    }

    #[test]
    fn test_user_probe_merges_over_builtin() {
        let config: VvaspConfig = toml::from_str(
            r#"
            [probes.tetrode]
            full_name = "Tetrode bundle"
            shank_offsets_um = [[-10, 0, 0]]
            shank_dims_um = [[20, 5000, 20]]
            "#,
        )
        .unwrap();
        let catalogue = config.probe_catalogue();
        assert!(catalogue.contains("tetrode"));
        assert!(catalogue.contains("NP1"));
    }
}
