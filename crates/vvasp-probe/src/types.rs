// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

/*!
Core types for probe operations.
*/

use nalgebra::Vector3;
use vvasp_geometry::GeometryError;

/// Points of one geometry part (a shank rectangle, a holder mesh, ...)
pub type PartPoints = Vec<Vector3<f64>>;

/// Result type for probe operations
pub type ProbeResult<T> = Result<T, ProbeError>;

/// Errors that can occur during probe operations
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("Invalid dimension for {what}: expected {expected} components, got {actual}")]
    InvalidDimension {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Missing collaborator: {0}")]
    MissingCollaborator(&'static str),

    #[error("Unknown movement direction: '{0}'")]
    UnknownDirection(String),

    #[error("No brain surface below entry location ML={ml} AP={ap}")]
    NoSurfaceIntersection { ml: f64, ap: f64 },

    #[error("Invalid chassis type \"{chassis}\" or probe type \"{probetype}\"")]
    InvalidHolder { chassis: String, probetype: String },

    #[error("Invalid surface mesh: {0}")]
    InvalidMesh(String),

    #[error(transparent)]
    Data(#[from] vvasp_structures::VvaspDataError),

    #[error(transparent)]
    Geometry(GeometryError),

    #[error(transparent)]
    Atlas(#[from] vvasp_atlas::AtlasError),
}

impl From<GeometryError> for ProbeError {
    fn from(err: GeometryError) -> Self {
        match err {
            GeometryError::InvalidDimension {
                what,
                expected,
                actual,
            } => ProbeError::InvalidDimension {
                what,
                expected,
                actual,
            },
            other => ProbeError::Geometry(other),
        }
    }
}
