// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

//! Configure, place a probe, trace its regions, save the plan and restore it.

use std::fs;

use ndarray::Array3;
use tempfile::TempDir;
use vvasp::atlas::{AtlasMetadata, Structure, StructureTree};
use vvasp::config::{load_config, Keybind};
use vvasp::probe::ProbeError;
use vvasp::prelude::*;

fn structure(acronym: &str, id: u32, path: Vec<u32>) -> Structure {
    Structure {
        acronym: acronym.to_string(),
        id,
        name: acronym.to_string(),
        structure_id_path: path,
        rgb_triplet: [200, 200, 200],
    }
}

/// "TH" below voxel z=4, "CTX" above, 25 µm voxels
fn layered_atlas(config: &VvaspConfig) -> VvaspAtlas {
    let tree = StructureTree::new(vec![
        structure("root", 997, vec![997]),
        structure("TH", 549, vec![997, 549]),
        structure("CTX", 688, vec![997, 688]),
    ]);
    let metadata = AtlasMetadata {
        name: "layered_25um".into(),
        resolution: [25.0; 3],
        orientation: "ras".into(),
        shape: Some([4, 4, 8]),
        species: Some("Mus musculus".into()),
        version: None,
    };
    let annotation = Array3::from_shape_fn((4, 4, 8), |(_, _, z)| if z < 4 { 549 } else { 688 });
    let mapping = config.atlas.default_mapping.clone().unwrap_or_default();
    VvaspAtlas::new(
        metadata,
        tree,
        annotation,
        RegionSelection::Mapping {
            acronyms: config.mapping_acronyms(&mapping).unwrap_or_default(),
            name: mapping,
        },
        config
            .atlas_transformation("layered_25um")
            .cloned()
            .unwrap_or_else(|| panic!("layered_25um placement missing from config")),
    )
    .unwrap()
}

const CONFIG: &str = r#"
[atlas]
default_atlas = "layered_25um"
default_mapping = "coarse"

[atlas.transformations.layered_25um]
bregma_location = [0, 0, 0]
angles = [0, 0, 0]

[atlas.mappings]
coarse = ["TH", "CTX"]
"#;

#[test]
fn test_plan_trace_save_restore() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("vvasp_configuration.toml");
    fs::write(&config_path, CONFIG).unwrap();
    let config = load_config(Some(&config_path), None).unwrap();
    let atlas = layered_atlas(&config);

    let catalogue = config.probe_catalogue();
    let mut probe = Probe::new("NP1", &catalogue)
        .unwrap()
        .with_axis_move_truncation(config.movement.advance_truncates)
        .with_info("thalamus");
    probe.set_location(Vector3::new(25.0, 25.0, 0.0), Vector3::new(90.0, 0.0, 0.0));

    // Shift+c advances, Shift+f retracts; whole-µm steps return exactly
    let controls = MovementControls::from_config(&config);
    assert!(controls.press(&mut probe, "Shift+c"));
    assert_eq!(probe.origin(), Vector3::new(25.0, 25.0, -100.0));
    assert!(controls.press(&mut probe, "Shift+f"));
    assert_eq!(probe.origin(), Vector3::new(25.0, 25.0, 0.0));
    controls.move_by_name(&mut probe, "sideways", 50.0).unwrap();
    assert_eq!(probe.origin(), Vector3::new(25.0, 25.0, 0.0));

    let regions = probe.compute_region_intersections(&atlas).unwrap();
    assert_eq!(regions[0].acronyms, vec!["TH", "CTX"]);
    assert_eq!(regions[0].distances_um, vec![0.0, 75.0, 175.0]);

    let experiment_path = config.paths.experiment_dir.clone();
    let experiment_path = dir.path().join(experiment_path).join("plan.json");
    save_experiment(&experiment_path, &ExperimentDocument::from_scene(&atlas, [&probe])).unwrap();

    let document = load_experiment_file(&experiment_path).unwrap();
    assert_eq!(document.atlas.mapping.as_deref(), Some("coarse"));
    let scene = document
        .restore_probes(&RestoreContext::new(catalogue))
        .unwrap();
    let restored = &scene.probes[0];
    assert_eq!(restored.info(), Some("thalamus"));
    assert_eq!(scene.active_index, Some(0));
    assert_eq!(restored.compute_region_intersections(&atlas).unwrap(), regions);
}

#[test]
fn test_home_resets_placement() {
    let mut probe = Probe::new("NP24", &ProbeCatalogue::builtin()).unwrap();
    probe.set_location(Vector3::new(-800.0, 1200.0, -2500.0), Vector3::new(55.0, 10.0, -30.0));
    probe.move_by(MovementCommand::Home, 0.0);
    assert_eq!(probe.origin(), Vector3::zeros());
    assert_eq!(probe.angles(), Vector3::new(90.0, 0.0, 0.0));
}

#[test]
fn test_configured_movement_rejects_unknown_directions() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("vvasp_configuration.toml");
    fs::write(
        &config_path,
        format!(
            "{}\n[movement]\nunknown_direction = \"reject\"\n\n[movement.keybinds]\n\"x\" = [\"ventral\", 250]\n",
            CONFIG
        ),
    )
    .unwrap();
    let config = load_config(Some(&config_path), None).unwrap();
    assert_eq!(config.movement.keybinds["x"], Keybind(MovementCommand::Ventral, 250.0));

    let controls = MovementControls::from_config(&config);
    let mut probe = Probe::new("NP1", &config.probe_catalogue()).unwrap();
    let err = controls.move_by_name(&mut probe, "sideways", 50.0).unwrap_err();
    assert!(matches!(err, ProbeError::UnknownDirection(_)));
    assert_eq!(probe.origin(), Vector3::zeros());

    assert!(controls.press(&mut probe, "x"));
    assert_eq!(probe.origin(), Vector3::new(0.0, 0.0, -250.0));
    assert!(!controls.press(&mut probe, "Shift+c"));
}
