// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

//! Probe placement, movement and region traversal, end to end.

use std::sync::Arc;

use nalgebra::Vector3;
use ndarray::Array3;
use vvasp_atlas::{AtlasMetadata, RegionSelection, Structure, StructureTree, VvaspAtlas};
use vvasp_probe::{Probe, ProbeError, TriangleMesh, VizObject};
use vvasp_structures::{
    AtlasTransformation, MovementCommand, ProbeCatalogue, ProbeGeometry, UnknownDirectionPolicy,
};

/// Flat brain surface at DV=0 around the bregma origin
fn flat_surface() -> Arc<TriangleMesh> {
    Arc::new(
        TriangleMesh::new(
            vec![
                Vector3::new(-5000.0, -3000.0, 0.0),
                Vector3::new(7000.0, -3000.0, 0.0),
                Vector3::new(7000.0, 5000.0, 0.0),
                Vector3::new(-5000.0, 5000.0, 0.0),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        )
        .unwrap(),
    )
}

fn single_shank_catalogue() -> ProbeCatalogue {
    let mut catalogue = ProbeCatalogue::empty();
    catalogue.insert(
        "single",
        ProbeGeometry::new("single shank", vec![[0.0, 0.0, 0.0]], vec![[0.0, 10000.0, 0.0]]).unwrap(),
    );
    catalogue
}

fn structure(acronym: &str, id: u32, path: Vec<u32>) -> Structure {
    Structure {
        acronym: acronym.to_string(),
        id,
        name: acronym.to_string(),
        structure_id_path: path,
        rgb_triplet: [128, 128, 128],
    }
}

/// Two regions stacked along DV: "A" for z < 4, "B" above, 25 µm voxels
fn stacked_atlas() -> VvaspAtlas {
    let tree = StructureTree::new(vec![
        structure("root", 997, vec![997]),
        structure("A", 1, vec![997, 1]),
        structure("B", 2, vec![997, 2]),
    ]);
    let metadata = AtlasMetadata {
        name: "stacked_25um".into(),
        resolution: [25.0; 3],
        orientation: "ras".into(),
        shape: Some([4, 4, 8]),
        species: None,
        version: None,
    };
    let annotation = Array3::from_shape_fn((4, 4, 8), |(_, _, z)| if z < 4 { 1 } else { 2 });
    VvaspAtlas::new(
        metadata,
        tree,
        annotation,
        RegionSelection::Mapping {
            name: "stacked".into(),
            acronyms: vec!["A".into(), "B".into()],
        },
        AtlasTransformation::new([0.0; 3], [0.0; 3]),
    )
    .unwrap()
}

#[test]
fn test_single_shank_straight_insertion() {
    let mut probe = Probe::new("single", &single_shank_catalogue())
        .unwrap()
        .with_surface(flat_surface());
    probe.set_location(Vector3::zeros(), Vector3::new(90.0, 0.0, 0.0));
    let entry = probe.entry_point().expect("surface at the probe origin");
    assert!(entry.norm() < 1e-6);

    probe.move_by(MovementCommand::Advance, 1000.0);
    assert!((probe.origin() - Vector3::new(0.0, 0.0, -1000.0)).norm() < 1e-9);
    assert!((probe.depth() - 1000.0).abs() < 1e-6);
}

#[test]
fn test_drive_probe_from_entry_matches_manual_insertion() {
    let mut probe = Probe::new("single", &single_shank_catalogue()).unwrap();
    probe
        .drive_probe_from_entry([0.0, 0.0], Vector3::new(90.0, 0.0, 0.0), 1000.0, Some(flat_surface()))
        .unwrap();
    assert!((probe.depth() - 1000.0).abs() < 1e-6);
    let props = probe.probe_properties();
    assert!((props.tip.dv + 1000.0).abs() < 1e-9);
    assert_eq!(props.angles.elevation, 90.0);
    assert!(props.entrypoint.into_point().is_some());
}

#[test]
fn test_four_shank_move_preserves_spacing() {
    let mut probe = Probe::new("NP24", &ProbeCatalogue::builtin()).unwrap();
    let before = probe.shank_origins().unwrap();
    probe.move_by(MovementCommand::Right, 100.0);
    let after = probe.shank_origins().unwrap();

    assert_eq!(before.len(), 4);
    for (b, a) in before.iter().zip(&after) {
        assert_eq!(a - b, Vector3::new(100.0, 0.0, 0.0));
    }
    for i in 1..4 {
        assert_eq!(after[i].x - after[i - 1].x, before[i].x - before[i - 1].x);
    }
}

#[test]
fn test_region_traversal_labels_two_segments() {
    let atlas = stacked_atlas();
    let mut probe = Probe::new("NP1", &ProbeCatalogue::builtin()).unwrap();
    // NP1 shank origin coincides with the probe origin; pointing up along DV
    probe.set_location(Vector3::new(25.0, 25.0, 0.0), Vector3::new(90.0, 0.0, 0.0));

    let regions = probe.compute_region_intersections(&atlas).unwrap();
    assert_eq!(regions.len(), 1);
    let shank = &regions[0];
    assert_eq!(shank.acronyms, vec!["A", "B"]);
    assert_eq!(shank.distances_um, vec![0.0, 75.0, 175.0]);
    assert_eq!(shank.distances_um.len(), shank.acronyms.len() + 1);
}

#[test]
fn test_region_traversal_outside_atlas() {
    let atlas = stacked_atlas();
    let mut probe = Probe::new("NP24", &ProbeCatalogue::builtin()).unwrap();
    probe.set_location(Vector3::new(5000.0, 5000.0, 5000.0), Vector3::new(90.0, 0.0, 0.0));
    let regions = probe.compute_region_intersections(&atlas).unwrap();
    assert_eq!(regions.len(), 4);
    for shank in &regions {
        // every path voxel clamps to the same corner column of the volume
        assert_eq!(shank.acronyms, vec!["B"]);
        assert_eq!(shank.distances_um, vec![0.0, 0.0]);
    }
}

#[test]
fn test_set_location_twice_is_bit_identical() {
    let mut probe = Probe::new("NP24", &ProbeCatalogue::builtin())
        .unwrap()
        .with_surface(flat_surface());
    let origin = Vector3::new(-1234.5, 876.25, -2500.0);
    let angles = Vector3::new(71.0, 12.5, -33.0);
    probe.set_location(origin, angles);
    let first_parts = probe.body().parts().to_vec();
    let first_entry = probe.entry_point();
    probe.set_location(origin, angles);
    assert_eq!(probe.body().parts(), first_parts.as_slice());
    assert_eq!(probe.entry_point(), first_entry);
    assert_eq!(probe.origin(), origin);
}

#[test]
fn test_unknown_direction_policy() {
    let mut probe = Probe::new("NP1", &ProbeCatalogue::builtin()).unwrap();
    probe
        .move_by_name("sideways", 10.0, UnknownDirectionPolicy::Ignore)
        .unwrap();
    assert_eq!(probe.origin(), Vector3::zeros());

    let err = probe
        .move_by_name("sideways", 10.0, UnknownDirectionPolicy::Reject)
        .unwrap_err();
    assert!(matches!(err, ProbeError::UnknownDirection(ref d) if d == "sideways"));

    probe
        .move_by_name("dorsal", 10.0, UnknownDirectionPolicy::Reject)
        .unwrap();
    assert_eq!(probe.origin(), Vector3::new(0.0, 0.0, 10.0));
}

#[test]
fn test_slice_placement_rejects_wrong_length() {
    let mut probe = Probe::new("NP1", &ProbeCatalogue::builtin()).unwrap();
    let err = probe
        .set_location_from_slices(&[0.0, 0.0], &[90.0, 0.0, 0.0])
        .unwrap_err();
    assert!(matches!(
        err,
        ProbeError::InvalidDimension {
            what: "origin",
            expected: 3,
            actual: 2
        }
    ));
}
