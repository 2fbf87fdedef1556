// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

/*!
# VVASP Geometry

Pure geometric building blocks for stereotaxic planning:

- **rotation**: degree-based rotation matrices, fixed probe order or explicit axis order
- **spherical**: displacement along a probe's own driving axis
- **transform**: bregma-relative µm <-> atlas voxel coordinates
- **bresenham**: 3D voxel line rasterization
- **boundaries**: region changes and midpoints along a voxel path

Nothing here holds mutable state; probes and atlases in the other crates
compose these functions.
*/

pub mod boundaries;
pub mod bresenham;
pub mod rotation;
pub mod spherical;
pub mod transform;
pub mod types;

pub use boundaries::{clamp_voxel, region_boundaries, RegionBoundaries, RegionVolume};
pub use bresenham::bresenham3d;
pub use rotation::{
    elementary_rotation, rotation_matrix_from_angles, rotation_matrix_from_degrees,
    rotation_matrix_with_order,
};
pub use spherical::displacement;
pub use transform::{CoordinateTransform, TransformParameters};
pub use types::{vector_from_slice, GeometryError, GeometryResult, Voxel};

/// Length of the forward ray cast from a probe origin (µm), long enough to
/// cross any realistic brain surface.
pub const FORWARD_RAY_LENGTH_UM: f64 = 10_000.0;

/// Forward vector in probe-local coordinates; probes point along local +y.
pub fn forward_vector() -> nalgebra::Vector3<f64> {
    nalgebra::Vector3::new(0.0, FORWARD_RAY_LENGTH_UM, 0.0)
}
