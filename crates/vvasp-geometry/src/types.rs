// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

/*!
Core types for geometry operations.
*/

use nalgebra::Vector3;

/// Integer voxel coordinate in atlas index space
pub type Voxel = Vector3<i64>;

/// Result type for geometry operations
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Errors that can occur during geometry operations
#[derive(Debug, thiserror::Error)]
pub enum GeometryError {
    #[error("Invalid dimension for {what}: expected {expected} components, got {actual}")]
    InvalidDimension {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid transform parameter: {0}")]
    InvalidParameter(String),

    #[error("Region volume has an empty axis: shape {shape:?}")]
    EmptyVolume { shape: [usize; 3] },

    #[error(transparent)]
    Data(#[from] vvasp_structures::VvaspDataError),
}

/// Build a 3-vector from a slice, rejecting anything that is not exactly 3 long.
pub fn vector_from_slice(what: &'static str, values: &[f64]) -> GeometryResult<Vector3<f64>> {
    match values {
        [x, y, z] => Ok(Vector3::new(*x, *y, *z)),
        _ => Err(GeometryError::InvalidDimension {
            what,
            expected: 3,
            actual: values.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_from_slice() {
        assert_eq!(
            vector_from_slice("origin", &[1.0, 2.0, 3.0]).unwrap(),
            Vector3::new(1.0, 2.0, 3.0)
        );
        let err = vector_from_slice("angles", &[1.0, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            GeometryError::InvalidDimension {
                what: "angles",
                expected: 3,
                actual: 2
            }
        ));
        assert!(vector_from_slice("origin", &[0.0; 4]).is_err());
    }
}
