// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

/*!
Region boundaries along a voxel path.

Given a rasterized path through a labelled volume, find the voxels where the
region id changes. Segment `i` of the result spans
`[boundaries[i], boundaries[i + 1])` and is labelled by the region found at
`midpoints[i]`.
*/

use ndarray::{Array3, ArrayView3};

use crate::types::{GeometryError, GeometryResult, Voxel};

/// A labelled 3D volume that can be indexed by voxel.
pub trait RegionVolume {
    fn shape(&self) -> [usize; 3];

    /// Region id at an in-bounds voxel.
    fn region_id(&self, index: [usize; 3]) -> u32;
}

impl RegionVolume for ArrayView3<'_, u32> {
    fn shape(&self) -> [usize; 3] {
        let dim = self.dim();
        [dim.0, dim.1, dim.2]
    }

    fn region_id(&self, index: [usize; 3]) -> u32 {
        self[index]
    }
}

impl RegionVolume for Array3<u32> {
    fn shape(&self) -> [usize; 3] {
        let dim = self.dim();
        [dim.0, dim.1, dim.2]
    }

    fn region_id(&self, index: [usize; 3]) -> u32 {
        self[index]
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegionBoundaries {
    /// First path voxel, every voxel where the id changes, last path voxel
    pub boundaries: Vec<Voxel>,
    /// Integer-truncated average of each adjacent pair of boundaries
    pub midpoints: Vec<Voxel>,
}

impl RegionBoundaries {
    pub fn segment_count(&self) -> usize {
        self.midpoints.len()
    }
}

/// Clamp a voxel into `[0, dim - 1]` on every axis.
pub fn clamp_voxel(voxel: &Voxel, shape: [usize; 3]) -> Voxel {
    Voxel::new(
        voxel.x.clamp(0, shape[0] as i64 - 1),
        voxel.y.clamp(0, shape[1] as i64 - 1),
        voxel.z.clamp(0, shape[2] as i64 - 1),
    )
}

fn as_index(voxel: &Voxel) -> [usize; 3] {
    [voxel.x as usize, voxel.y as usize, voxel.z as usize]
}

/// Boundaries and midpoints of the regions a voxel path crosses.
///
/// Path voxels outside the volume are clamped to the nearest edge voxel, not
/// discarded, and the reported boundaries are the clamped voxels. The result
/// always starts with the first and ends with the last path voxel; an empty
/// path gives empty boundaries and midpoints.
pub fn region_boundaries<V: RegionVolume + ?Sized>(
    path: &[Voxel],
    volume: &V,
) -> GeometryResult<RegionBoundaries> {
    let shape = volume.shape();
    if shape.iter().any(|&d| d == 0) {
        return Err(GeometryError::EmptyVolume { shape });
    }
    let (Some(first), Some(last)) = (path.first(), path.last()) else {
        return Ok(RegionBoundaries::default());
    };

    let clamped: Vec<Voxel> = path.iter().map(|v| clamp_voxel(v, shape)).collect();
    let ids: Vec<u32> = clamped
        .iter()
        .map(|v| volume.region_id(as_index(v)))
        .collect();

    let mut boundaries = Vec::with_capacity(4);
    boundaries.push(clamp_voxel(first, shape));
    boundaries.extend(
        ids.windows(2)
            .zip(clamped.iter())
            .filter(|(pair, _)| pair[0] != pair[1])
            .map(|(_, voxel)| *voxel),
    );
    boundaries.push(clamp_voxel(last, shape));

    let midpoints = boundaries
        .windows(2)
        .map(|pair| (pair[0] + pair[1]) / 2)
        .collect();

    Ok(RegionBoundaries {
        boundaries,
        midpoints,
    })
}
