// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

/*!
2D annotation slices at a bregma-relative location.

Only the data is produced here; colouring and plotting belong to whatever
displays it.
*/

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use nalgebra::Vector3;
use ndarray::{Array2, Axis};

use crate::atlas::VvaspAtlas;
use crate::metadata::Section;
use crate::types::{AtlasError, AtlasResult};

/// Slice plane named in stereotaxic terms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlicePlane {
    Coronal,
    Sagittal,
    Transverse,
}

impl SlicePlane {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlicePlane::Coronal => "coronal",
            SlicePlane::Sagittal => "sagittal",
            SlicePlane::Transverse => "transverse",
        }
    }

    fn section(&self) -> Section {
        match self {
            SlicePlane::Coronal => Section::Frontal,
            SlicePlane::Sagittal => Section::Sagittal,
            SlicePlane::Transverse => Section::Horizontal,
        }
    }

    /// Index of the ML/AP/DV axis this plane is positioned along.
    fn stereotaxic_axis(&self) -> usize {
        match self {
            SlicePlane::Sagittal => 0,
            SlicePlane::Coronal => 1,
            SlicePlane::Transverse => 2,
        }
    }
}

impl FromStr for SlicePlane {
    type Err = AtlasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "coronal" => Ok(SlicePlane::Coronal),
            "sagittal" => Ok(SlicePlane::Sagittal),
            "transverse" => Ok(SlicePlane::Transverse),
            other => Err(AtlasError::InvalidOrientation(format!(
                "invalid slice plane '{}', must be one of coronal, sagittal, transverse",
                other
            ))),
        }
    }
}

impl Display for SlicePlane {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl VvaspAtlas {
    /// Annotation slice through `plane` at `location_um` from bregma.
    ///
    /// With `remapped` the slice comes from the remapped annotation, so every
    /// label is a selected region (or 0).
    pub fn annotation_slice(
        &self,
        plane: SlicePlane,
        location_um: f64,
        remapped: bool,
    ) -> AtlasResult<Array2<u32>> {
        let axis = self.metadata().section_axis(plane.section())?;

        let mut position = Vector3::zeros();
        position[plane.stereotaxic_axis()] = location_um;
        let index = self.transform().to_voxel_rounded(&position)[axis];

        let len = self.shape()[axis];
        if index < 0 || index as usize >= len {
            return Err(AtlasError::SliceOutOfBounds {
                plane: plane.as_str(),
                index,
                len,
            });
        }

        let slice = if remapped {
            self.remapped_annotation()
                .index_axis(Axis(axis), index as usize)
                .to_owned()
        } else {
            self.annotation()
                .index_axis(Axis(axis), index as usize)
                .to_owned()
        };
        Ok(slice)
    }
}
