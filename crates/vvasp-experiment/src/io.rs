// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

/*!
Experiment files on disk.

Documents are pretty-printed JSON named `<experiment>.json`; exports are
plain-text tables meant for the surgery notes.
*/

use std::fmt;
use std::fs;
use std::path::Path;

use tracing::info;
use vvasp_probe::ProbeProperties;

use crate::document::ExperimentDocument;
use crate::types::{ExperimentError, ExperimentResult};

pub const EXPERIMENT_EXTENSION: &str = "json";

pub fn save_experiment(path: &Path, document: &ExperimentDocument) -> ExperimentResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ExperimentError::io(parent, e))?;
    }
    let json = serde_json::to_string_pretty(document)?;
    fs::write(path, json).map_err(|e| ExperimentError::io(path, e))?;
    info!(
        target: "vvasp-experiment",
        path = %path.display(),
        probes = document.probes.len(),
        "Experiment saved"
    );
    Ok(())
}

pub fn load_experiment_file(path: &Path) -> ExperimentResult<ExperimentDocument> {
    if !path.exists() {
        return Err(ExperimentError::NotFound(path.to_path_buf()));
    }
    let json = fs::read_to_string(path).map_err(|e| ExperimentError::io(path, e))?;
    let document: ExperimentDocument = serde_json::from_str(&json)?;
    info!(
        target: "vvasp-experiment",
        path = %path.display(),
        atlas = %document.atlas.name,
        probes = document.probes.len(),
        "Experiment loaded"
    );
    Ok(document)
}

/// Names (file stems) of the experiments in `dir`, sorted. A missing
/// directory has no experiments.
pub fn list_experiments(dir: &Path) -> ExperimentResult<Vec<String>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| ExperimentError::io(dir, e))? {
        let path = entry.map_err(|e| ExperimentError::io(dir, e))?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(EXPERIMENT_EXTENSION) {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            names.push(stem.to_string());
        }
    }
    names.sort();
    Ok(names)
}

fn format_triplet(values: [f64; 3]) -> String {
    format!("{:.1}, {:.1}, {:.1}", values[0], values[1], values[2])
}

fn write_probe(out: &mut impl fmt::Write, index: usize, probe: &ProbeProperties) -> fmt::Result {
    let marker = if probe.active { " (active)" } else { "" };
    match probe.label() {
        Some(label) => writeln!(out, "{}: {}{}", label, probe.probetype, marker)?,
        None => writeln!(out, "probe{}: {}{}", index, probe.probetype, marker)?,
    }
    writeln!(out, "  tip (ML, AP, DV) um: {}", format_triplet(probe.tip.to_ml_ap_dv()))?;
    writeln!(
        out,
        "  angles (elevation, spin, azimuth) deg: {}",
        format_triplet(probe.angles.to_angle_vector())
    )?;
    match probe.entrypoint.into_point() {
        Some(entry) => writeln!(out, "  entry (ML, AP, DV) um: {}", format_triplet(entry.to_ml_ap_dv()))?,
        None => writeln!(out, "  entry (ML, AP, DV) um: none")?,
    }
    writeln!(out, "  depth along probe axis um: {:.1}", probe.depth_along_probe_axis)
}

fn write_export(out: &mut impl fmt::Write, document: &ExperimentDocument) -> fmt::Result {
    let atlas = &document.atlas;
    writeln!(out, "Atlas: {}", atlas.name)?;
    if let Some(mapping) = &atlas.mapping {
        writeln!(out, "Mapping: {}", mapping)?;
    }
    writeln!(out, "Bregma (voxels): {}", format_triplet(atlas.bregma_location))?;
    writeln!(out, "Atlas rotation (deg): {}", format_triplet(atlas.rotation_angles))?;
    for (index, probe) in document.probes.iter().enumerate() {
        writeln!(out)?;
        write_probe(out, index, probe)?;
    }
    Ok(())
}

/// Plain-text rendering of a document.
pub fn render_export(document: &ExperimentDocument) -> ExperimentResult<String> {
    let mut out = String::new();
    write_export(&mut out, document)?;
    Ok(out)
}

pub fn export_experiment(path: &Path, document: &ExperimentDocument) -> ExperimentResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ExperimentError::io(parent, e))?;
    }
    fs::write(path, render_export(document)?).map_err(|e| ExperimentError::io(path, e))?;
    info!(target: "vvasp-experiment", path = %path.display(), "Experiment exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use vvasp_atlas::AtlasProperties;
    use vvasp_structures::{OptionalStereotaxicPoint, ProbeAngles, StereotaxicPoint};

    fn sample_document() -> ExperimentDocument {
        let mut document = ExperimentDocument::new(AtlasProperties {
            name: "allen_mouse_25um".into(),
            min_tree_depth: None,
            max_tree_depth: None,
            mapping: Some("Beryl".into()),
            visible_regions: vec!["CTX".into()],
            bregma_location: [216.0, 18.0, 228.0],
            rotation_angles: [90.0, -5.0, 90.0],
            scaling: [1.0; 3],
        });
        document.probes.push(ProbeProperties {
            probetype: "NP24".into(),
            info: None,
            active: true,
            tip: StereotaxicPoint::new(-1500.0, -2000.0, -3000.0),
            angles: ProbeAngles::new(70.0, 0.0, -15.0),
            entrypoint: OptionalStereotaxicPoint::from(Some([-1400.0, -1900.0, -200.0])),
            depth_along_probe_axis: 2815.5,
        });
        document
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("mouse1.json");
        let document = sample_document();
        save_experiment(&path, &document).unwrap();
        assert_eq!(load_experiment_file(&path).unwrap(), document);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_experiment_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ExperimentError::NotFound(_)));
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, r#"{"probes": []}"#).unwrap();
        assert!(matches!(load_experiment_file(&path), Err(ExperimentError::Json(_))));
    }

    #[test]
    fn test_list_experiments_sorted_json_only() {
        let dir = TempDir::new().unwrap();
        for name in ["rat2.json", "mouse1.json", "notes.txt"] {
            fs::write(dir.path().join(name), "{}").unwrap();
        }
        fs::create_dir(dir.path().join("old.json")).unwrap();
        assert_eq!(list_experiments(dir.path()).unwrap(), vec!["mouse1", "rat2"]);
        assert!(list_experiments(&dir.path().join("missing")).unwrap().is_empty());
    }

    #[test]
    fn test_export_table() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mouse1.txt");
        export_experiment(&path, &sample_document()).unwrap();
        let text = fs::read_to_string(&path).unwrap();

        assert!(text.starts_with("Atlas: allen_mouse_25um\nMapping: Beryl\n"));
        assert!(text.contains("probe0: NP24 (active)\n"));
        assert!(text.contains("  tip (ML, AP, DV) um: -1500.0, -2000.0, -3000.0\n"));
        assert!(text.contains("  angles (elevation, spin, azimuth) deg: 70.0, 0.0, -15.0\n"));
        assert!(text.contains("  entry (ML, AP, DV) um: -1400.0, -1900.0, -200.0\n"));
        assert!(text.contains("  depth along probe axis um: 2815.5\n"));
    }

    #[test]
    fn test_render_labels_and_missing_entry() {
        let mut document = sample_document();
        let mut second = document.probes[0].clone();
        second.info = Some(Some("V1 array".into()));
        second.active = false;
        second.entrypoint = OptionalStereotaxicPoint::default();
        document.probes.push(second);
        let mut third = document.probes[1].clone();
        third.info = Some(None);
        document.probes.push(third);

        let text = render_export(&document).unwrap();
        assert!(text.contains("\nV1 array: NP24\n"));
        assert!(text.contains("  entry (ML, AP, DV) um: none\n"));
        assert!(text.contains("\nprobe2: NP24\n"));
        assert_eq!(text.matches("depth along probe axis um:").count(), 3);
    }
}
