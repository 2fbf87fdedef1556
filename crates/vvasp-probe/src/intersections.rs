// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

/*!
Region traversal: which atlas regions each shank passes through, and where.

This walks a full-length voxel line per shank, so it is an explicit call
rather than something every movement triggers. Shanks are independent and
the atlas is only read, so with the `parallel` feature they are traversed on
the rayon pool.
*/

use nalgebra::Vector3;
use tracing::debug;
use vvasp_atlas::VvaspAtlas;
use vvasp_geometry::bresenham3d;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::probe::Probe;
use crate::types::ProbeResult;
use crate::viz_object::VizObject;

/// Regions crossed by one shank.
///
/// `distances_um` are boundary positions measured from the shank origin's
/// boundary; `acronyms[i]` labels the stretch between `distances_um[i]` and
/// `distances_um[i + 1]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShankRegions {
    pub distances_um: Vec<f64>,
    pub acronyms: Vec<String>,
}

impl ShankRegions {
    /// `(start_um, end_um, acronym)` for every region segment
    pub fn segments(&self) -> impl Iterator<Item = (f64, f64, &str)> + '_ {
        self.distances_um
            .windows(2)
            .zip(&self.acronyms)
            .map(|(pair, acronym)| (pair[0], pair[1], acronym.as_str()))
    }

    pub fn segment_count(&self) -> usize {
        self.acronyms.len()
    }
}

/// Regions along the segment from `start_um` to `start_um + direction_um`.
pub fn trace_regions(
    atlas: &VvaspAtlas,
    start_um: &Vector3<f64>,
    direction_um: &Vector3<f64>,
) -> ProbeResult<ShankRegions> {
    let end_um = start_um + direction_um;
    let voxels = atlas.bregma_positions_to_atlas_voxels(&[*start_um, end_um]);
    let path = bresenham3d(voxels[0], voxels[1]);
    let boundaries = atlas.atlas_voxels_to_annotation_boundaries(&path)?;

    let acronyms = boundaries
        .midpoints
        .iter()
        .map(|voxel| atlas.structure_from_coords(voxel, None))
        .collect();

    let resolution = atlas.resolution();
    let scaled: Vec<Vector3<f64>> = boundaries
        .boundaries
        .iter()
        .map(|voxel| voxel.cast::<f64>().component_mul(&resolution))
        .collect();
    let distances_um = match scaled.first() {
        Some(zero) => scaled.iter().map(|p| (p - zero).norm()).collect(),
        None => Vec::new(),
    };

    Ok(ShankRegions {
        distances_um,
        acronyms,
    })
}

impl Probe {
    /// Regions crossed by every shank, in shank order.
    pub fn compute_region_intersections(&self, atlas: &VvaspAtlas) -> ProbeResult<Vec<ShankRegions>> {
        let forward = self.forward();
        let origins = self.shank_origins().unwrap_or_default();

        #[cfg(feature = "parallel")]
        let regions: ProbeResult<Vec<ShankRegions>> = origins
            .par_iter()
            .map(|origin| trace_regions(atlas, origin, &forward))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let regions: ProbeResult<Vec<ShankRegions>> = origins
            .iter()
            .map(|origin| trace_regions(atlas, origin, &forward))
            .collect();

        let regions = regions?;
        for (shank, shank_regions) in regions.iter().enumerate() {
            debug!(
                target: "vvasp-probe",
                shank,
                segments = shank_regions.segment_count(),
                "Shank region traversal"
            );
        }
        Ok(regions)
    }
}
