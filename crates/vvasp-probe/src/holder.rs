// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

/*!
Neuropixels chronic holders.

A holder is an extra mesh carried rigidly by a probe. Meshes are authored in
millimetres with their own origin and orientation, so each probe type has a
fixed placement that brings the holder onto the probe frame: scale to µm,
shift by the per-type origin, then rotate with the explicit `xyz` order.
*/

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use vvasp_geometry::rotation_matrix_with_order;
use vvasp_structures::AxisOrder;

use crate::types::{PartPoints, ProbeError, ProbeResult};

/// Holder meshes are stored in mm; scene units are µm.
pub const HOLDER_SCALE_FACTOR: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChassisType {
    HeadFixed,
    FreelyMoving,
}

impl ChassisType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChassisType::HeadFixed => "head_fixed",
            ChassisType::FreelyMoving => "freely_moving",
        }
    }
}

impl FromStr for ChassisType {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "head_fixed" => Ok(ChassisType::HeadFixed),
            "freely_moving" => Ok(ChassisType::FreelyMoving),
            other => Err(ProbeError::InvalidHolder {
                chassis: other.to_string(),
                probetype: String::new(),
            }),
        }
    }
}

impl Display for ChassisType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `(chassis, probe type)` -> (mesh file, display name)
pub const MESH_MAPPING: [(ChassisType, &str, &str, &str); 6] = [
    (ChassisType::HeadFixed, "NP24", "np2_head_fixed.stl", "NP2 chronic holder - head fixed"),
    (ChassisType::FreelyMoving, "NP24", "np2_freely_moving.stl", "NP2 chronic holder - freely moving"),
    (ChassisType::HeadFixed, "NP24a", "np2a_head_fixed.stl", "NP2a chronic holder - head fixed"),
    (ChassisType::FreelyMoving, "NP24a", "np2a_freely_moving.stl", "NP2a chronic holder - freely moving"),
    (ChassisType::HeadFixed, "NP1", "np1_head_fixed.stl", "NP1 chronic holder - head fixed"),
    (ChassisType::FreelyMoving, "NP1", "np1_freely_moving.stl", "NP1 chronic holder - freely moving"),
];

/// Placement of a holder mesh onto the probe frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HolderPlacement {
    /// `[x, y, z]` rotation in degrees, applied in `xyz` order
    pub rotation: [f64; 3],
    /// Translation in µm applied after scaling
    pub origin_um: [f64; 3],
}

pub fn holder_placement(probetype: &str) -> Option<HolderPlacement> {
    let (rotation, origin_mm) = match probetype {
        "NP24" => ([0.0, 0.0, 90.0], [-32.399, -12.612, 16.973]),
        "NP1" => ([-90.0, 0.0, 0.0], [-0.081, 1.978, -9.762]),
        "NP24a" => ([0.0, 0.0, 90.0], [-33.259, 2.768, -2.080]),
        _ => return None,
    };
    Some(HolderPlacement {
        rotation,
        origin_um: origin_mm.map(|v: f64| -v * HOLDER_SCALE_FACTOR),
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChronicHolder {
    chassis: ChassisType,
    probetype: String,
    mesh_file: &'static str,
    display_name: &'static str,
    /// Holder vertices in the mesh file's own frame (mm)
    vertices_mm: PartPoints,
}

impl ChronicHolder {
    /// `vertices_mm` are the raw vertices of the holder mesh.
    pub fn new(chassis: ChassisType, probetype: &str, vertices_mm: PartPoints) -> ProbeResult<Self> {
        let (_, _, mesh_file, display_name) = MESH_MAPPING
            .iter()
            .find(|(c, p, _, _)| *c == chassis && *p == probetype)
            .copied()
            .ok_or_else(|| ProbeError::InvalidHolder {
                chassis: chassis.to_string(),
                probetype: probetype.to_string(),
            })?;
        Ok(Self {
            chassis,
            probetype: probetype.to_string(),
            mesh_file,
            display_name,
            vertices_mm,
        })
    }

    /// Reverse lookup of a display name such as `"NP1 chronic holder - head fixed"`.
    pub fn from_display_name(display_name: &str) -> Option<(ChassisType, &'static str)> {
        MESH_MAPPING
            .iter()
            .find(|(_, _, _, name)| *name == display_name)
            .map(|(chassis, probetype, _, _)| (*chassis, *probetype))
    }

    pub fn chassis(&self) -> ChassisType {
        self.chassis
    }

    pub fn probetype(&self) -> &str {
        &self.probetype
    }

    /// Mesh file name the holder vertices are expected to come from
    pub fn mesh_file(&self) -> &'static str {
        self.mesh_file
    }

    pub fn display_name(&self) -> &'static str {
        self.display_name
    }

    /// Holder vertices placed in the probe's local frame (µm).
    pub fn local_points(&self) -> ProbeResult<PartPoints> {
        let placement = holder_placement(&self.probetype).ok_or_else(|| ProbeError::InvalidHolder {
            chassis: self.chassis.to_string(),
            probetype: self.probetype.clone(),
        })?;
        let [x, y, z] = placement.rotation;
        let rotation = rotation_matrix_with_order(x, y, z, AxisOrder::XYZ);
        let origin = Vector3::from(placement.origin_um);
        Ok(self
            .vertices_mm
            .iter()
            .map(|v| rotation * (v * HOLDER_SCALE_FACTOR + origin))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pairs_rejected() {
        assert!(ChronicHolder::new(ChassisType::HeadFixed, "utah10x10", vec![]).is_err());
        assert!("on_a_stick".parse::<ChassisType>().is_err());
        let holder = ChronicHolder::new("freely_moving".parse().unwrap(), "NP24a", vec![]).unwrap();
        assert_eq!(holder.display_name(), "NP2a chronic holder - freely moving");
        assert_eq!(holder.mesh_file(), "np2a_freely_moving.stl");
    }

    #[test]
    fn test_display_name_lookup() {
        assert_eq!(
            ChronicHolder::from_display_name("NP1 chronic holder - head fixed"),
            Some((ChassisType::HeadFixed, "NP1"))
        );
        assert_eq!(ChronicHolder::from_display_name("NP1"), None);
    }

    #[test]
    fn test_np24_placement() {
        // the mesh vertex at the holder origin lands on the probe origin
        let vertex = Vector3::new(-32.399, -12.612, 16.973);
        let holder = ChronicHolder::new(ChassisType::HeadFixed, "NP24", vec![vertex, vertex + Vector3::x()]).unwrap();
        let points = holder.local_points().unwrap();
        assert!(points[0].norm() < 1e-6);
        // +1 mm along x, rotated 90 degrees about z, ends up on +y
        assert!((points[1] - Vector3::new(0.0, 1000.0, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn test_np1_placement() {
        let vertex = Vector3::new(-0.081, 1.978, -9.762) + Vector3::y();
        let holder = ChronicHolder::new(ChassisType::FreelyMoving, "NP1", vec![vertex]).unwrap();
        let points = holder.local_points().unwrap();
        // +y rotated -90 degrees about x points along -z
        assert!((points[0] - Vector3::new(0.0, 0.0, -1000.0)).norm() < 1e-6);
    }
}
