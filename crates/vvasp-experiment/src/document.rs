// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

/*!
Experiment documents: the atlas setup plus every planned probe.

A document is a snapshot. Restoring it rebuilds live probes from the stored
tip and angles; entry points and depths are recomputed against whatever
surface the caller attaches, not read back from the file.
*/

use std::collections::HashMap;
use std::sync::Arc;

use nalgebra::Vector3;
use ndarray::Array3;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use vvasp_atlas::{AtlasMetadata, AtlasProperties, StructureTree, VvaspAtlas};
use vvasp_probe::{
    ChronicHolder, PartPoints, Probe, ProbeProperties, SurfaceMesh, VizObject, MESH_MAPPING,
};
use vvasp_structures::ProbeCatalogue;

use crate::types::{ExperimentError, ExperimentResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentDocument {
    pub atlas: AtlasProperties,
    #[serde(default)]
    pub probes: Vec<ProbeProperties>,
}

/// Everything needed to turn stored probe records back into probes.
pub struct RestoreContext {
    catalogue: ProbeCatalogue,
    surface: Option<Arc<dyn SurfaceMesh>>,
    /// Holder mesh file name -> raw vertices (mm)
    holder_meshes: HashMap<String, PartPoints>,
    truncate_axis_moves: bool,
}

impl RestoreContext {
    pub fn new(catalogue: ProbeCatalogue) -> Self {
        Self {
            catalogue,
            surface: None,
            holder_meshes: HashMap::new(),
            truncate_axis_moves: true,
        }
    }

    pub fn with_surface(mut self, surface: Arc<dyn SurfaceMesh>) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Vertices for one of the holder meshes named in [`MESH_MAPPING`].
    /// Holders whose mesh was not supplied are restored without geometry.
    pub fn with_holder_mesh(mut self, mesh_file: impl Into<String>, vertices_mm: PartPoints) -> Self {
        self.holder_meshes.insert(mesh_file.into(), vertices_mm);
        self
    }

    pub fn with_axis_move_truncation(mut self, truncate: bool) -> Self {
        self.truncate_axis_moves = truncate;
        self
    }

    fn build_probe(&self, object_type: &str) -> ExperimentResult<Probe> {
        if let Some((chassis, probetype)) = ChronicHolder::from_display_name(object_type) {
            let vertices = MESH_MAPPING
                .iter()
                .find(|(_, _, _, name)| *name == object_type)
                .and_then(|(_, _, mesh_file, _)| self.holder_meshes.get(*mesh_file))
                .cloned()
                .unwrap_or_default();
            return Ok(Probe::with_holder(probetype, chassis, vertices, &self.catalogue)?);
        }
        if self.catalogue.contains(object_type) {
            return Ok(Probe::new(object_type, &self.catalogue)?);
        }
        Err(ExperimentError::UnknownObjectType(object_type.to_string()))
    }
}

/// Probes rebuilt from a document
#[derive(Debug)]
pub struct RestoredScene {
    pub probes: Vec<Probe>,
    /// Index of the last probe stored as active
    pub active_index: Option<usize>,
}

impl ExperimentDocument {
    pub fn new(atlas: AtlasProperties) -> Self {
        Self {
            atlas,
            probes: Vec::new(),
        }
    }

    /// Snapshot the current atlas and probes.
    pub fn from_scene<'a>(atlas: &VvaspAtlas, probes: impl IntoIterator<Item = &'a Probe>) -> Self {
        Self {
            atlas: atlas.atlas_properties(),
            probes: probes.into_iter().map(Probe::probe_properties).collect(),
        }
    }

    pub fn restore_probes(&self, context: &RestoreContext) -> ExperimentResult<RestoredScene> {
        let mut probes = Vec::with_capacity(self.probes.len());
        let mut active_index = None;

        for (i, record) in self.probes.iter().enumerate() {
            let mut probe = context
                .build_probe(&record.probetype)?
                .with_axis_move_truncation(context.truncate_axis_moves);
            if let Some(surface) = &context.surface {
                probe = probe.with_surface(Arc::clone(surface));
            }
            // records written without an `info` key get a positional name
            let info = match &record.info {
                Some(label) => label.clone(),
                None => Some(format!("probe{}", i)),
            };
            probe.set_info(info);
            probe.set_active(record.active);
            probe.set_location(
                Vector3::from(record.tip.to_ml_ap_dv()),
                Vector3::from(record.angles.to_angle_vector()),
            );
            if record.active {
                active_index = Some(i);
            }
            debug!(
                target: "vvasp-experiment",
                index = i,
                object = %record.probetype,
                "Probe restored"
            );
            probes.push(probe);
        }

        info!(
            target: "vvasp-experiment",
            probes = probes.len(),
            active = ?active_index,
            "Experiment probes restored"
        );
        Ok(RestoredScene {
            probes,
            active_index,
        })
    }

    /// Rebuild the atlas this document was planned against. `mapping_acronyms`
    /// resolves the stored mapping name.
    pub fn restore_atlas(
        &self,
        metadata: AtlasMetadata,
        structures: StructureTree,
        annotation: Array3<u32>,
        mapping_acronyms: impl Fn(&str) -> Option<Vec<String>>,
    ) -> ExperimentResult<VvaspAtlas> {
        Ok(VvaspAtlas::from_properties(
            &self.atlas,
            metadata,
            structures,
            annotation,
            mapping_acronyms,
        )?)
    }
}
