// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

/*!
StructureTree - the atlas region hierarchy.

Parsed from a brainglobe `structures.json`. Each structure records the path
of ids from the root down to itself, so ancestry and tree depth come straight
from `structure_id_path` without building explicit child lists.
*/

use std::path::Path;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::types::{AtlasError, AtlasResult, RegionId};

/// One region of the atlas hierarchy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    pub acronym: String,
    pub id: RegionId,
    pub name: String,
    /// Ids from the root down to this structure, inclusive
    pub structure_id_path: Vec<RegionId>,
    pub rgb_triplet: [u8; 3],
}

impl Structure {
    /// Number of levels from the root; the root itself has depth 1.
    pub fn tree_depth(&self) -> usize {
        self.structure_id_path.len()
    }

    pub fn is_descendant_of(&self, ancestor: RegionId) -> bool {
        self.id != ancestor && self.structure_id_path.contains(&ancestor)
    }
}

#[derive(Debug, Clone)]
pub struct StructureTree {
    /// Structures in file order
    structures: Vec<Structure>,
    by_id: AHashMap<RegionId, usize>,
    by_acronym: AHashMap<String, usize>,
}

impl StructureTree {
    pub fn new(structures: Vec<Structure>) -> Self {
        let by_id = structures
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id, i))
            .collect();
        let by_acronym = structures
            .iter()
            .enumerate()
            .map(|(i, s)| (s.acronym.clone(), i))
            .collect();
        Self {
            structures,
            by_id,
            by_acronym,
        }
    }

    pub fn from_json_str(json: &str) -> AtlasResult<Self> {
        let structures: Vec<Structure> = serde_json::from_str(json)?;
        Ok(Self::new(structures))
    }

    pub fn from_file(path: &Path) -> AtlasResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| AtlasError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn len(&self) -> usize {
        self.structures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Structure> {
        self.structures.iter()
    }

    pub fn get_by_id(&self, id: RegionId) -> Option<&Structure> {
        self.by_id.get(&id).map(|&i| &self.structures[i])
    }

    pub fn get_by_acronym(&self, acronym: &str) -> Option<&Structure> {
        self.by_acronym.get(acronym).map(|&i| &self.structures[i])
    }

    pub fn require(&self, acronym: &str) -> AtlasResult<&Structure> {
        self.get_by_acronym(acronym)
            .ok_or_else(|| AtlasError::UnknownRegion(acronym.to_string()))
    }

    pub fn acronyms(&self) -> impl Iterator<Item = &str> {
        self.structures.iter().map(|s| s.acronym.as_str())
    }

    pub fn color(&self, acronym: &str) -> AtlasResult<[u8; 3]> {
        Ok(self.require(acronym)?.rgb_triplet)
    }

    /// All structures below `acronym` in the hierarchy (not including itself).
    pub fn descendants(&self, acronym: &str) -> AtlasResult<Vec<&Structure>> {
        let ancestor = self.require(acronym)?.id;
        Ok(self
            .structures
            .iter()
            .filter(|s| s.is_descendant_of(ancestor))
            .collect())
    }

    /// Ids of `acronym` and every structure below it.
    pub fn subtree_ids(&self, acronym: &str) -> AtlasResult<Vec<RegionId>> {
        let root = self.require(acronym)?.id;
        Ok(self
            .structures
            .iter()
            .filter(|s| s.id == root || s.is_descendant_of(root))
            .map(|s| s.id)
            .collect())
    }

    /// The ancestor of `id` at `level` of its id path, or `id` itself when the
    /// structure is not that deep.
    pub fn ancestor_at_level(&self, id: RegionId, level: usize) -> Option<&Structure> {
        let structure = self.get_by_id(id)?;
        match structure.structure_id_path.get(level) {
            Some(&ancestor) => self.get_by_id(ancestor),
            None => Some(structure),
        }
    }

    pub fn max_tree_depth(&self) -> usize {
        self.structures
            .iter()
            .map(Structure::tree_depth)
            .max()
            .unwrap_or(0)
    }
}
