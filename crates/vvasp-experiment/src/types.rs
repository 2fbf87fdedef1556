// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use thiserror::Error;

pub type ExperimentResult<T> = Result<T, ExperimentError>;

#[derive(Error, Debug)]
pub enum ExperimentError {
    #[error("Experiment file not found: {0}")]
    NotFound(PathBuf),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid experiment document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to render export: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("Unknown object type '{0}' in experiment document")]
    UnknownObjectType(String),

    #[error(transparent)]
    Probe(#[from] vvasp_probe::ProbeError),

    #[error(transparent)]
    Atlas(#[from] vvasp_atlas::AtlasError),
}

impl ExperimentError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExperimentError::Io {
            path: path.into(),
            source,
        }
    }
}
