// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

/*!
Bregma-relative physical space <-> atlas voxel space.

Physical positions are `[ML, AP, DV]` in µm relative to bregma. Voxel
coordinates index the atlas volume. Points are treated as row vectors, so
"apply the rotation" means `p · R`, which for column vectors is `Rᵀ p`.

```text
to_voxel:    v = ((p / scale) · R + reference * resolution) / resolution
to_physical: p = ((v * resolution - reference * resolution) · Rᵀ) * scale
```

No bounds checking happens here; out-of-volume coordinates are the caller's
concern.
*/

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use vvasp_structures::AxisOrder;

use crate::rotation::rotation_matrix_with_order;
use crate::types::{GeometryError, GeometryResult, Voxel};

/// Parameters that define a [`CoordinateTransform`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformParameters {
    /// Bregma location in voxel units
    pub reference_point: Vector3<f64>,
    /// `[elevation, spin, azimuth]` in degrees
    pub rotation_angles: Vector3<f64>,
    pub rotation_order: AxisOrder,
    /// Per-axis anisotropic scale
    pub scale: Vector3<f64>,
    /// µm per voxel, per axis
    pub resolution: Vector3<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateTransform {
    params: TransformParameters,
    rotation: Matrix3<f64>,
    reference_um: Vector3<f64>,
}

impl CoordinateTransform {
    pub fn new(params: TransformParameters) -> GeometryResult<Self> {
        if params.scale.iter().any(|s| !s.is_finite() || *s == 0.0) {
            warn!(target: "vvasp-geometry", scale = ?params.scale.as_slice(), "Rejected transform scale");
            return Err(GeometryError::InvalidParameter(format!(
                "scale must be finite and non-zero, got {:?}",
                params.scale.as_slice()
            )));
        }
        if params.resolution.iter().any(|r| !r.is_finite() || *r <= 0.0) {
            warn!(
                target: "vvasp-geometry",
                resolution = ?params.resolution.as_slice(),
                "Rejected transform resolution"
            );
            return Err(GeometryError::InvalidParameter(format!(
                "resolution must be positive, got {:?}",
                params.resolution.as_slice()
            )));
        }
        let angles = params.rotation_angles;
        let rotation = rotation_matrix_with_order(angles.x, angles.y, angles.z, params.rotation_order);
        let reference_um = params.reference_point.component_mul(&params.resolution);
        debug!(
            target: "vvasp-geometry",
            reference = ?params.reference_point.as_slice(),
            angles = ?angles.as_slice(),
            order = %params.rotation_order,
            "Coordinate transform built"
        );
        Ok(Self {
            params,
            rotation,
            reference_um,
        })
    }

    /// Identity rotation, unit scale, isotropic resolution.
    pub fn with_isotropic_resolution(
        reference_point: Vector3<f64>,
        resolution_um: f64,
    ) -> GeometryResult<Self> {
        Self::new(TransformParameters {
            reference_point,
            rotation_angles: Vector3::zeros(),
            rotation_order: AxisOrder::XYZ,
            scale: Vector3::repeat(1.0),
            resolution: Vector3::repeat(resolution_um),
        })
    }

    pub fn parameters(&self) -> &TransformParameters {
        &self.params
    }

    pub fn rotation(&self) -> &Matrix3<f64> {
        &self.rotation
    }

    pub fn resolution(&self) -> &Vector3<f64> {
        &self.params.resolution
    }

    /// Physical position to fractional voxel coordinates.
    pub fn to_voxel(&self, physical_um: &Vector3<f64>) -> Vector3<f64> {
        let unscaled = physical_um.component_div(&self.params.scale);
        let rotated = self.rotation.transpose() * unscaled;
        (rotated + self.reference_um).component_div(&self.params.resolution)
    }

    /// Physical position to the nearest voxel (ties to even).
    pub fn to_voxel_rounded(&self, physical_um: &Vector3<f64>) -> Voxel {
        self.to_voxel(physical_um).map(|v| v.round_ties_even() as i64)
    }

    pub fn to_physical(&self, voxel: &Vector3<f64>) -> Vector3<f64> {
        let um = voxel.component_mul(&self.params.resolution) - self.reference_um;
        (self.rotation * um).component_mul(&self.params.scale)
    }

    pub fn voxel_to_physical(&self, voxel: &Voxel) -> Vector3<f64> {
        self.to_physical(&voxel.map(|v| v as f64))
    }

    /// Batch form of [`Self::to_voxel`]; row `i` of the output maps row `i` of the input.
    pub fn to_voxels(&self, physical_um: &[Vector3<f64>]) -> Vec<Vector3<f64>> {
        physical_um.iter().map(|p| self.to_voxel(p)).collect()
    }

    pub fn to_voxels_rounded(&self, physical_um: &[Vector3<f64>]) -> Vec<Voxel> {
        physical_um.iter().map(|p| self.to_voxel_rounded(p)).collect()
    }

    pub fn to_physicals(&self, voxels: &[Vector3<f64>]) -> Vec<Vector3<f64>> {
        voxels.iter().map(|v| self.to_physical(v)).collect()
    }
}
