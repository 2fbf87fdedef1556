// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

/*!
Degree-based rotation matrices.

Angles are always given as `(elevation, spin, azimuth)`, i.e. rotations about
x, y and z. Probe geometry is authored against the fixed composition
`Rz · Rx · Ry`; atlas transforms name their order explicitly.
*/

use nalgebra::{Matrix3, Vector3};
use vvasp_structures::{Axis, AxisOrder};

/// Right-handed rotation about a single axis.
pub fn elementary_rotation(axis: Axis, degrees: f64) -> Matrix3<f64> {
    let (s, c) = degrees.to_radians().sin_cos();
    match axis {
        Axis::X => Matrix3::new(
            1.0, 0.0, 0.0, //
            0.0, c, -s, //
            0.0, s, c,
        ),
        Axis::Y => Matrix3::new(
            c, 0.0, s, //
            0.0, 1.0, 0.0, //
            -s, 0.0, c,
        ),
        Axis::Z => Matrix3::new(
            c, -s, 0.0, //
            s, c, 0.0, //
            0.0, 0.0, 1.0,
        ),
    }
}

/// Probe rotation: `Rz(azimuth) · Rx(elevation) · Ry(spin)`.
pub fn rotation_matrix_from_degrees(elevation: f64, spin: f64, azimuth: f64) -> Matrix3<f64> {
    elementary_rotation(Axis::Z, azimuth)
        * elementary_rotation(Axis::X, elevation)
        * elementary_rotation(Axis::Y, spin)
}

/// Same as [`rotation_matrix_from_degrees`] for an `[elevation, spin, azimuth]` vector.
pub fn rotation_matrix_from_angles(angles: &Vector3<f64>) -> Matrix3<f64> {
    rotation_matrix_from_degrees(angles.x, angles.y, angles.z)
}

/// Rotation with an explicit axis order.
///
/// For order `abc` the product is `R[c] · R[b] · R[a]`: the first named axis is
/// applied to a column vector first. Atlas transforms are calibrated against
/// this convention.
pub fn rotation_matrix_with_order(
    elevation: f64,
    spin: f64,
    azimuth: f64,
    order: AxisOrder,
) -> Matrix3<f64> {
    let angle_for = |axis: Axis| match axis {
        Axis::X => elevation,
        Axis::Y => spin,
        Axis::Z => azimuth,
    };
    let [first, second, third] = order.axes();
    elementary_rotation(third, angle_for(third))
        * elementary_rotation(second, angle_for(second))
        * elementary_rotation(first, angle_for(first))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_matrix_close(a: &Matrix3<f64>, b: &Matrix3<f64>) {
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < 1e-12, "{} != {}", a, b);
        }
    }

    #[test]
    fn test_zero_angles_identity() {
        assert_eq!(rotation_matrix_from_degrees(0.0, 0.0, 0.0), Matrix3::identity());
        assert_eq!(
            rotation_matrix_with_order(0.0, 0.0, 0.0, AxisOrder::XYZ),
            Matrix3::identity()
        );
    }

    #[test]
    fn test_elevation_90_points_forward_axis_up() {
        let r = rotation_matrix_from_degrees(90.0, 0.0, 0.0);
        let forward = r * Vector3::new(0.0, 1.0, 0.0);
        assert!((forward - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn test_default_composition_order() {
        let (e, s, a) = (30.0, -12.0, 71.0);
        let expected = elementary_rotation(Axis::Z, a)
            * elementary_rotation(Axis::X, e)
            * elementary_rotation(Axis::Y, s);
        assert_eq!(rotation_matrix_from_degrees(e, s, a), expected);
    }

    #[test]
    fn test_explicit_order_reads_right_to_left() {
        let (e, s, a) = (90.0, -5.0, 90.0);
        let xyz = rotation_matrix_with_order(e, s, a, AxisOrder::XYZ);
        let expected = elementary_rotation(Axis::Z, a)
            * elementary_rotation(Axis::Y, s)
            * elementary_rotation(Axis::X, e);
        assert_matrix_close(&xyz, &expected);

        let zxy: AxisOrder = "zxy".parse().unwrap();
        let expected = elementary_rotation(Axis::Y, s)
            * elementary_rotation(Axis::X, e)
            * elementary_rotation(Axis::Z, a);
        assert_matrix_close(&rotation_matrix_with_order(e, s, a, zxy), &expected);
    }
}
