// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

use nalgebra::Vector3;

/// Cartesian displacement of `distance` along the direction given by
/// `elevation` and `azimuth` (degrees).
///
/// This is the probe's own driving axis: for any spin it equals
/// `rotation_matrix_from_degrees(elevation, spin, azimuth) * [0, distance, 0]`.
/// Retracting moves by `+displacement`, advancing by `-displacement`.
pub fn displacement(distance: f64, elevation: f64, azimuth: f64) -> Vector3<f64> {
    let (sin_e, cos_e) = elevation.to_radians().sin_cos();
    let (sin_a, cos_a) = azimuth.to_radians().sin_cos();
    Vector3::new(
        -distance * cos_e * sin_a,
        distance * cos_e * cos_a,
        distance * sin_e,
    )
}
