// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

/*!
VvaspAtlas - a labelled atlas volume placed in bregma-relative space.

The atlas owns the annotation volume, the structure tree, the region
selection and the transform between stereotaxic µm and atlas voxels. It is
read-mostly: probes query it during region traversal, and it only changes
when it is rebuilt or its visible regions are edited.
*/

use std::sync::Arc;

use ahash::AHashSet;
use nalgebra::Vector3;
use ndarray::Array3;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use vvasp_geometry::{
    region_boundaries, CoordinateTransform, RegionBoundaries, TransformParameters, Voxel,
};
use vvasp_structures::{AtlasTransformation, AxisOrder};

use crate::metadata::AtlasMetadata;
use crate::remap::RemappedAnnotation;
use crate::selection::RegionSelection;
use crate::structures::StructureTree;
use crate::types::{AtlasError, AtlasResult, RegionId, OUTSIDE_ATLAS};

/// Atlas state as stored in experiment documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtlasProperties {
    pub name: String,
    #[serde(default)]
    pub min_tree_depth: Option<usize>,
    #[serde(default)]
    pub max_tree_depth: Option<usize>,
    #[serde(default)]
    pub mapping: Option<String>,
    #[serde(default)]
    pub visible_regions: Vec<String>,
    pub bregma_location: [f64; 3],
    pub rotation_angles: [f64; 3],
    #[serde(default = "unit_scaling")]
    pub scaling: [f64; 3],
}

fn unit_scaling() -> [f64; 3] {
    [1.0, 1.0, 1.0]
}

impl AtlasProperties {
    pub fn transformation(&self) -> AtlasTransformation {
        AtlasTransformation {
            bregma_location: self.bregma_location,
            angles: self.rotation_angles,
            scaling: self.scaling,
            rotation_order: AxisOrder::XYZ,
        }
    }
}

#[derive(Debug)]
pub struct VvaspAtlas {
    name: String,
    metadata: AtlasMetadata,
    structures: StructureTree,
    annotation: Array3<u32>,
    selection: RegionSelection,
    selected_ids: AHashSet<RegionId>,
    transformation: AtlasTransformation,
    transform: CoordinateTransform,
    visible_regions: Vec<String>,
    remapped: RemappedAnnotation,
}

impl VvaspAtlas {
    pub fn new(
        metadata: AtlasMetadata,
        structures: StructureTree,
        annotation: Array3<u32>,
        selection: RegionSelection,
        transformation: AtlasTransformation,
    ) -> AtlasResult<Self> {
        let dim = annotation.dim();
        let actual = [dim.0, dim.1, dim.2];
        if let Some(expected) = metadata.shape {
            if expected != actual {
                return Err(AtlasError::VolumeShapeMismatch { expected, actual });
            }
        }
        if let RegionSelection::Mapping { name, acronyms } = &selection {
            if acronyms.is_empty() {
                return Err(AtlasError::InvalidRegionSelection(format!(
                    "mapping '{}' lists no regions",
                    name
                )));
            }
        }

        let transform = CoordinateTransform::new(TransformParameters {
            reference_point: Vector3::from(transformation.bregma_location),
            rotation_angles: Vector3::from(transformation.angles),
            rotation_order: transformation.rotation_order,
            scale: Vector3::from(transformation.scaling),
            resolution: Vector3::from(metadata.resolution),
        })?;
        let selected_ids = selection.selected_ids(&structures);
        debug!(
            target: "vvasp-atlas",
            atlas = %metadata.name,
            selected = selected_ids.len(),
            shape = ?actual,
            "Atlas initialised"
        );

        Ok(Self {
            name: metadata.name.clone(),
            metadata,
            structures,
            annotation,
            selection,
            selected_ids,
            transformation,
            transform,
            visible_regions: Vec::new(),
            remapped: RemappedAnnotation::new(),
        })
    }

    /// Rebuild an atlas from stored properties. `mapping_acronyms` resolves a
    /// mapping name to its acronym list.
    pub fn from_properties(
        properties: &AtlasProperties,
        metadata: AtlasMetadata,
        structures: StructureTree,
        annotation: Array3<u32>,
        mapping_acronyms: impl Fn(&str) -> Option<Vec<String>>,
    ) -> AtlasResult<Self> {
        let mapping = match &properties.mapping {
            Some(name) => {
                let acronyms = mapping_acronyms(name).ok_or_else(|| {
                    AtlasError::InvalidRegionSelection(format!("unknown mapping '{}'", name))
                })?;
                Some((name.clone(), acronyms))
            }
            None => None,
        };
        let selection = RegionSelection::from_parameters(
            mapping,
            properties.min_tree_depth,
            properties.max_tree_depth,
        )?;
        let mut atlas = Self::new(
            metadata,
            structures,
            annotation,
            selection,
            properties.transformation(),
        )?;
        atlas.name = properties.name.clone();
        for region in &properties.visible_regions {
            atlas.add_visible_region(region)?;
        }
        Ok(atlas)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn metadata(&self) -> &AtlasMetadata {
        &self.metadata
    }

    pub fn structures(&self) -> &StructureTree {
        &self.structures
    }

    pub fn annotation(&self) -> &Array3<u32> {
        &self.annotation
    }

    pub fn shape(&self) -> [usize; 3] {
        let dim = self.annotation.dim();
        [dim.0, dim.1, dim.2]
    }

    /// µm per voxel along each axis
    pub fn resolution(&self) -> Vector3<f64> {
        Vector3::from(self.metadata.resolution)
    }

    pub fn transform(&self) -> &CoordinateTransform {
        &self.transform
    }

    pub fn transformation(&self) -> &AtlasTransformation {
        &self.transformation
    }

    pub fn selection(&self) -> &RegionSelection {
        &self.selection
    }

    pub fn is_selected(&self, acronym: &str) -> bool {
        self.structures
            .get_by_acronym(acronym)
            .is_some_and(|s| self.selected_ids.contains(&s.id))
    }

    /// Acronyms of the selected structures, in structure-tree order.
    pub fn selected_acronyms(&self) -> Vec<&str> {
        self.structures
            .iter()
            .filter(|s| self.selected_ids.contains(&s.id))
            .map(|s| s.acronym.as_str())
            .collect()
    }

    pub fn bregma_positions_to_atlas_voxels(&self, positions_um: &[Vector3<f64>]) -> Vec<Voxel> {
        self.transform.to_voxels_rounded(positions_um)
    }

    /// Sub-voxel precision variant of [`Self::bregma_positions_to_atlas_voxels`].
    pub fn bregma_positions_to_fractional_voxels(
        &self,
        positions_um: &[Vector3<f64>],
    ) -> Vec<Vector3<f64>> {
        self.transform.to_voxels(positions_um)
    }

    pub fn atlas_voxels_to_bregma_positions(&self, voxels: &[Vector3<f64>]) -> Vec<Vector3<f64>> {
        self.transform.to_physicals(voxels)
    }

    /// Region boundaries and midpoints along a voxel path through the annotation.
    pub fn atlas_voxels_to_annotation_boundaries(
        &self,
        path: &[Voxel],
    ) -> AtlasResult<RegionBoundaries> {
        Ok(region_boundaries(path, &self.annotation)?)
    }

    /// Annotation id at a voxel; `None` outside the volume.
    pub fn region_id_at(&self, voxel: &Voxel) -> Option<RegionId> {
        let shape = self.shape();
        let in_bounds = (0..3).all(|axis| voxel[axis] >= 0 && (voxel[axis] as usize) < shape[axis]);
        if !in_bounds {
            return None;
        }
        Some(self.annotation[[voxel.x as usize, voxel.y as usize, voxel.z as usize]])
    }

    /// Acronym of the structure at a voxel, optionally lifted to the ancestor
    /// at `hierarchy_level` of its id path.
    pub fn structure_from_coords(&self, voxel: &Voxel, hierarchy_level: Option<usize>) -> String {
        let id = match self.region_id_at(voxel) {
            Some(0) | None => return OUTSIDE_ATLAS.to_string(),
            Some(id) => id,
        };
        let structure = match hierarchy_level {
            Some(level) => self.structures.ancestor_at_level(id, level),
            None => self.structures.get_by_id(id),
        };
        match structure {
            Some(s) => s.acronym.clone(),
            None => {
                warn!(target: "vvasp-atlas", id, "Annotation id missing from structure tree");
                OUTSIDE_ATLAS.to_string()
            }
        }
    }

    pub fn bregma_positions_to_structures(
        &self,
        positions_um: &[Vector3<f64>],
        hierarchy_level: Option<usize>,
    ) -> Vec<String> {
        self.bregma_positions_to_atlas_voxels(positions_um)
            .iter()
            .map(|v| self.structure_from_coords(v, hierarchy_level))
            .collect()
    }

    /// Mark a region visible. Adding a region twice is a no-op.
    pub fn add_visible_region(&mut self, acronym: &str) -> AtlasResult<()> {
        self.structures.require(acronym)?;
        if !self.visible_regions.iter().any(|r| r == acronym) {
            self.visible_regions.push(acronym.to_string());
        }
        Ok(())
    }

    /// Returns whether the region was visible.
    pub fn remove_visible_region(&mut self, acronym: &str) -> bool {
        let before = self.visible_regions.len();
        self.visible_regions.retain(|r| r != acronym);
        let removed = self.visible_regions.len() != before;
        if !removed {
            debug!(target: "vvasp-atlas", %acronym, "No visible region to remove");
        }
        removed
    }

    /// Every selected region except root becomes visible.
    pub fn show_all_regions(&mut self) {
        let acronyms: Vec<String> = self
            .selected_acronyms()
            .into_iter()
            .filter(|a| *a != crate::selection::ROOT_ACRONYM)
            .map(str::to_owned)
            .collect();
        for acronym in acronyms {
            if !self.visible_regions.contains(&acronym) {
                self.visible_regions.push(acronym);
            }
        }
    }

    pub fn clear_visible_regions(&mut self) {
        self.visible_regions.clear();
    }

    pub fn visible_regions(&self) -> &[String] {
        &self.visible_regions
    }

    /// Annotation relabelled to the selected regions, computed once and cached.
    pub fn remapped_annotation(&self) -> Arc<Array3<u32>> {
        let targets = self.selection.remap_targets(&self.structures);
        self.remapped
            .get_or_compute(&self.annotation, &self.structures, &targets)
    }

    /// Change the region selection; drops the cached remapped annotation.
    pub fn set_selection(&mut self, selection: RegionSelection) {
        self.selected_ids = selection.selected_ids(&self.structures);
        self.selection = selection;
        self.remapped.invalidate();
    }

    pub fn atlas_properties(&self) -> AtlasProperties {
        let (min_tree_depth, max_tree_depth) = self.selection.tree_depths();
        AtlasProperties {
            name: self.name.clone(),
            min_tree_depth,
            max_tree_depth,
            mapping: self.selection.mapping_name().map(str::to_owned),
            visible_regions: self.visible_regions.clone(),
            bregma_location: self.transformation.bregma_location,
            rotation_angles: self.transformation.angles,
            scaling: self.transformation.scaling,
        }
    }
}
