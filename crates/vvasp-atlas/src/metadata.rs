// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

/*!
Atlas metadata and on-disk atlas discovery.

Atlases live in the brainglobe layout: one directory per atlas under the atlas
directory, each holding `metadata.json` and `structures.json`.
*/

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::structures::StructureTree;
use crate::types::{AtlasError, AtlasResult};

pub const METADATA_FILE: &str = "metadata.json";
pub const STRUCTURES_FILE: &str = "structures.json";

/// Anatomical section named by the brainglobe space convention
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Frontal,
    Sagittal,
    Horizontal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtlasMetadata {
    pub name: String,
    /// µm per voxel along each volume axis
    pub resolution: [f64; 3],
    /// Three letters giving the direction each volume axis points,
    /// e.g. `asr` = anterior, superior, right
    pub orientation: String,
    /// Volume shape, when the metadata records it
    #[serde(default)]
    pub shape: Option<[usize; 3]>,
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl AtlasMetadata {
    pub fn from_file(path: &Path) -> AtlasResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| AtlasError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    /// The section cut perpendicular to each volume axis.
    pub fn sections(&self) -> AtlasResult<[Section; 3]> {
        let letters: Vec<char> = self.orientation.chars().collect();
        if letters.len() != 3 {
            return Err(AtlasError::InvalidOrientation(self.orientation.clone()));
        }
        let mut sections = [Section::Frontal; 3];
        for (slot, letter) in sections.iter_mut().zip(letters) {
            *slot = match letter.to_ascii_lowercase() {
                'a' | 'p' => Section::Frontal,
                's' | 'i' => Section::Horizontal,
                'l' | 'r' => Section::Sagittal,
                _ => return Err(AtlasError::InvalidOrientation(self.orientation.clone())),
            };
        }
        if sections[0] == sections[1] || sections[0] == sections[2] || sections[1] == sections[2] {
            return Err(AtlasError::InvalidOrientation(self.orientation.clone()));
        }
        Ok(sections)
    }

    /// Index of the volume axis a section is cut along.
    pub fn section_axis(&self, section: Section) -> AtlasResult<usize> {
        self.sections()?
            .iter()
            .position(|s| *s == section)
            .ok_or_else(|| AtlasError::InvalidOrientation(self.orientation.clone()))
    }
}

/// Metadata and structure tree of one installed atlas directory.
pub fn read_atlas_files(atlas_path: &Path) -> AtlasResult<(AtlasMetadata, StructureTree)> {
    let metadata = AtlasMetadata::from_file(&atlas_path.join(METADATA_FILE))?;
    let structures = StructureTree::from_file(&atlas_path.join(STRUCTURES_FILE))?;
    Ok((metadata, structures))
}

/// Names of the atlases installed under `atlas_dir`, sorted.
pub fn list_available_atlases(atlas_dir: &Path) -> AtlasResult<Vec<String>> {
    let entries = std::fs::read_dir(atlas_dir).map_err(|source| AtlasError::Io {
        path: atlas_dir.to_path_buf(),
        source,
    })?;
    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_owned))
        .collect();
    names.sort();
    Ok(names)
}
