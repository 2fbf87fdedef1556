// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

//! # Geometry Property Tests
//!
//! Universal properties of the geometry primitives:
//! - rotation matrices are orthonormal for any angles
//! - bregma <-> voxel transforms round-trip
//! - Bresenham paths hit both endpoints and step monotonically on the driving axis
//! - region boundaries are always bracketed by the path endpoints

use nalgebra::{Matrix3, Vector3};
use ndarray::Array3;
use proptest::prelude::*;
use vvasp_geometry::{
    bresenham3d, clamp_voxel, region_boundaries, rotation_matrix_from_degrees,
    rotation_matrix_with_order, CoordinateTransform, TransformParameters, Voxel,
};
use vvasp_structures::AxisOrder;

fn angle() -> impl Strategy<Value = f64> {
    -360.0f64..360.0
}

fn voxel(range: std::ops::Range<i64>) -> impl Strategy<Value = Voxel> {
    (range.clone(), range.clone(), range).prop_map(|(x, y, z)| Voxel::new(x, y, z))
}

fn axis_order() -> impl Strategy<Value = AxisOrder> {
    prop::sample::select(vec!["xyz", "xzy", "yxz", "yzx", "zxy", "zyx"])
        .prop_map(|s| s.parse::<AxisOrder>().unwrap())
}

fn assert_orthonormal(r: &Matrix3<f64>) -> Result<(), TestCaseError> {
    let product = r * r.transpose();
    for (a, b) in product.iter().zip(Matrix3::<f64>::identity().iter()) {
        prop_assert!((a - b).abs() < 1e-9);
    }
    prop_assert!((r.determinant() - 1.0).abs() < 1e-9);
    Ok(())
}

proptest! {
    #[test]
    fn rotation_is_orthonormal(e in angle(), s in angle(), a in angle()) {
        assert_orthonormal(&rotation_matrix_from_degrees(e, s, a))?;
    }

    #[test]
    fn ordered_rotation_is_orthonormal(e in angle(), s in angle(), a in angle(), order in axis_order()) {
        assert_orthonormal(&rotation_matrix_with_order(e, s, a, order))?;
    }

    #[test]
    fn transform_round_trips(
        px in -12_000.0f64..12_000.0,
        py in -12_000.0f64..12_000.0,
        pz in -12_000.0f64..12_000.0,
        e in angle(), s in angle(), a in angle(),
        order in axis_order(),
        scale in (0.5f64..2.0, 0.5f64..2.0, 0.5f64..2.0),
        resolution in 5.0f64..100.0,
    ) {
        let transform = CoordinateTransform::new(TransformParameters {
            reference_point: Vector3::new(216.0, 18.0, 228.0),
            rotation_angles: Vector3::new(e, s, a),
            rotation_order: order,
            scale: Vector3::new(scale.0, scale.1, scale.2),
            resolution: Vector3::repeat(resolution),
        }).unwrap();
        let p = Vector3::new(px, py, pz);
        let back = transform.to_physical(&transform.to_voxel(&p));
        prop_assert!((back - p).norm() <= 1e-6 * p.norm().max(1.0));
    }

    #[test]
    fn bresenham_hits_endpoints(start in voxel(-50..50), end in voxel(-50..50)) {
        let path = bresenham3d(start, end);
        prop_assert_eq!(path[0], start);
        prop_assert_eq!(*path.last().unwrap(), end);
        if start == end {
            prop_assert_eq!(path.len(), 1);
        }
    }

    #[test]
    fn bresenham_driving_axis_is_monotonic(start in voxel(-50..50), end in voxel(-50..50)) {
        let delta = (end - start).abs();
        let driving = if delta.x >= delta.y && delta.x >= delta.z {
            0
        } else if delta.y >= delta.z {
            1
        } else {
            2
        };
        let step = (end[driving] - start[driving]).signum();
        let path = bresenham3d(start, end);
        prop_assert_eq!(path.len() as i64, delta[driving] + 1);
        for pair in path.windows(2) {
            prop_assert_eq!(pair[1][driving] - pair[0][driving], step);
            let jump = (pair[1] - pair[0]).abs();
            prop_assert!(jump.iter().all(|d| *d <= 1));
        }
    }

    #[test]
    fn boundaries_are_bracketed(
        start in voxel(-5..15),
        end in voxel(-5..15),
        split in 0usize..10,
    ) {
        let volume = Array3::<u32>::from_shape_fn((10, 10, 10), |(x, _, z)| if x + z < split * 2 { 1 } else { 2 });
        let path = bresenham3d(start, end);
        let result = region_boundaries(&path, &volume).unwrap();
        let shape = [10, 10, 10];
        prop_assert_eq!(result.boundaries[0], clamp_voxel(&start, shape));
        prop_assert_eq!(*result.boundaries.last().unwrap(), clamp_voxel(&end, shape));
        prop_assert_eq!(result.midpoints.len() + 1, result.boundaries.len());
    }
}
