// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

/*!
Probe shank layouts and the catalogue of known probe types.

A probe type is pure configuration data: a display name plus, for every
shank, the offset of its corner from the probe origin and its
`[width, length, thickness]` in µm. Everything that moves lives in
`vvasp-probe`; this module only describes shapes.
*/

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::VvaspDataError;

/// One rectangular shank, in probe-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShankGeometry {
    /// Corner of the shank relative to the probe origin (µm)
    pub offset_um: [f64; 3],
    /// `[width, length, thickness]` in µm
    pub dims_um: [f64; 3],
}

impl ShankGeometry {
    /// Local origin of the shank: the corner shifted to the middle of the
    /// shank's width and thickness.
    pub fn local_origin(&self) -> [f64; 3] {
        [
            self.offset_um[0] + self.dims_um[0] / 2.0,
            self.offset_um[1],
            self.offset_um[2] + self.dims_um[2] / 2.0,
        ]
    }
}

/// Geometry description of one probe type, as stored in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeGeometry {
    pub full_name: String,
    pub shank_offsets_um: Vec<[f64; 3]>,
    pub shank_dims_um: Vec<[f64; 3]>,
}

impl ProbeGeometry {
    pub fn new(
        full_name: impl Into<String>,
        shank_offsets_um: Vec<[f64; 3]>,
        shank_dims_um: Vec<[f64; 3]>,
    ) -> Result<Self, VvaspDataError> {
        let geometry = Self {
            full_name: full_name.into(),
            shank_offsets_um,
            shank_dims_um,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    pub fn validate(&self) -> Result<(), VvaspDataError> {
        if self.shank_offsets_um.is_empty() {
            return Err(VvaspDataError::InvalidGeometry(format!(
                "'{}' has no shanks",
                self.full_name
            )));
        }
        if self.shank_offsets_um.len() != self.shank_dims_um.len() {
            return Err(VvaspDataError::InvalidGeometry(format!(
                "'{}' has {} shank offsets but {} shank dimensions",
                self.full_name,
                self.shank_offsets_um.len(),
                self.shank_dims_um.len()
            )));
        }
        let all_finite = self
            .shank_offsets_um
            .iter()
            .chain(self.shank_dims_um.iter())
            .flatten()
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(VvaspDataError::InvalidGeometry(format!(
                "'{}' contains non-finite values",
                self.full_name
            )));
        }
        Ok(())
    }

    pub fn shank_count(&self) -> usize {
        self.shank_offsets_um.len()
    }

    pub fn shanks(&self) -> impl Iterator<Item = ShankGeometry> + '_ {
        self.shank_offsets_um
            .iter()
            .zip(self.shank_dims_um.iter())
            .map(|(offset, dims)| ShankGeometry {
                offset_um: *offset,
                dims_um: *dims,
            })
    }
}

/// Shank layout of a Blackrock (Utah) array.
///
/// Shanks sit on a `rows x cols` grid with `pitch_um` spacing in the
/// probe-local x/z plane, centred on the probe origin and pointing along y.
/// Returned offsets are shank corners, i.e. the grid position minus half of
/// the shank's width and thickness.
pub fn blackrock_array_geometry(
    rows: usize,
    cols: usize,
    pitch_um: f64,
    shank_dims: [f64; 3],
) -> (Vec<[f64; 3]>, Vec<[f64; 3]>) {
    let x_center = (cols.saturating_sub(1)) as f64 / 2.0;
    let z_center = (rows.saturating_sub(1)) as f64 / 2.0;
    let mut offsets = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            let x = (col as f64 - x_center) * pitch_um;
            let z = (row as f64 - z_center) * pitch_um;
            offsets.push([x - shank_dims[0] / 2.0, 0.0, z - shank_dims[2] / 2.0]);
        }
    }
    let dims = vec![shank_dims; offsets.len()];
    (offsets, dims)
}

/// Probe types by identifier (`NP1`, `NP24`, `utah10x10`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProbeCatalogue {
    probes: BTreeMap<String, ProbeGeometry>,
}

impl Default for ProbeCatalogue {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ProbeCatalogue {
    pub fn empty() -> Self {
        Self {
            probes: BTreeMap::new(),
        }
    }

    /// The probe types every installation knows about.
    pub fn builtin() -> Self {
        let mut probes = BTreeMap::new();
        probes.insert(
            "NP1".to_string(),
            ProbeGeometry {
                full_name: "Neuropixels 1.0".to_string(),
                shank_offsets_um: vec![[-35.0, 0.0, 0.0]],
                shank_dims_um: vec![[70.0, 10000.0, 0.0]],
            },
        );
        probes.insert(
            "NP24".to_string(),
            ProbeGeometry {
                full_name: "Neuropixels 2.0 - 4Shank".to_string(),
                shank_offsets_um: vec![
                    [-410.0, 0.0, 0.0],
                    [-160.0, 0.0, 0.0],
                    [90.0, 0.0, 0.0],
                    [340.0, 0.0, 0.0],
                ],
                shank_dims_um: vec![[70.0, 10000.0, 0.0]; 4],
            },
        );
        let (utah_offsets, utah_dims) =
            blackrock_array_geometry(10, 10, 400.0, [30.0, -1000.0, 0.0]);
        probes.insert(
            "utah10x10".to_string(),
            ProbeGeometry {
                full_name: "Utah Array 1043-29 (10 x 10)".to_string(),
                shank_offsets_um: utah_offsets,
                shank_dims_um: utah_dims,
            },
        );
        Self { probes }
    }

    /// Geometry lookup key for a probe type. Variants such as `NP24a` share
    /// the geometry of their base type.
    pub fn geometry_key(probetype: &str) -> String {
        probetype.replace("4a", "4")
    }

    pub fn get(&self, probetype: &str) -> Result<&ProbeGeometry, VvaspDataError> {
        self.probes
            .get(&Self::geometry_key(probetype))
            .ok_or_else(|| VvaspDataError::UnknownProbeType(probetype.to_string()))
    }

    pub fn contains(&self, probetype: &str) -> bool {
        self.probes.contains_key(&Self::geometry_key(probetype))
    }

    pub fn insert(&mut self, probetype: impl Into<String>, geometry: ProbeGeometry) {
        self.probes.insert(probetype.into(), geometry);
    }

    /// Overlay `other` on top of this catalogue; entries in `other` win.
    pub fn merge(&mut self, other: ProbeCatalogue) {
        self.probes.extend(other.probes);
    }

    pub fn probe_types(&self) -> impl Iterator<Item = &str> {
        self.probes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.probes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }
}
