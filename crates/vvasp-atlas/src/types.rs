// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

/*!
Core types for atlas operations.
*/

use std::path::PathBuf;

/// Region id as stored in the annotation volume; 0 is outside the brain
pub type RegionId = u32;

/// Acronym reported for voxels outside the labelled brain
pub const OUTSIDE_ATLAS: &str = "Outside atlas";

/// Result type for atlas operations
pub type AtlasResult<T> = Result<T, AtlasError>;

/// Errors that can occur during atlas operations
#[derive(Debug, thiserror::Error)]
pub enum AtlasError {
    #[error("Unknown region: {0}")]
    UnknownRegion(String),

    #[error("Invalid region selection: {0}")]
    InvalidRegionSelection(String),

    #[error("No transformation configured for atlas '{0}'")]
    UnknownAtlas(String),

    #[error("Annotation shape mismatch: metadata says {expected:?}, volume is {actual:?}")]
    VolumeShapeMismatch {
        expected: [usize; 3],
        actual: [usize; 3],
    },

    #[error("Invalid atlas orientation '{0}'")]
    InvalidOrientation(String),

    #[error("{plane} slice index {index} outside volume axis of length {len}")]
    SliceOutOfBounds {
        plane: &'static str,
        index: i64,
        len: usize,
    },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse atlas JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Geometry(#[from] vvasp_geometry::GeometryError),
}
