// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

/*!
RemappedAnnotation - lazily computed, explicitly invalidated cache of the
annotation volume relabelled to the selected regions.

Every voxel becomes the id of the selected structure whose subtree contains
it; voxels no selected subtree covers become 0. Building it touches every
voxel of the atlas, so it is computed on first use and kept until the
selection changes.
*/

use std::sync::Arc;
use std::time::Instant;

use ahash::AHashMap;
use ndarray::Array3;
use parking_lot::RwLock;
use tracing::info;

#[cfg(feature = "parallel")]
use ndarray::Zip;

use crate::structures::StructureTree;
use crate::types::RegionId;

/// Lookup from original annotation id to remapped id.
pub fn build_remap_table(tree: &StructureTree, targets: &[RegionId]) -> AHashMap<RegionId, RegionId> {
    let mut table = AHashMap::new();
    for &target in targets {
        let Some(structure) = tree.get_by_id(target) else {
            continue;
        };
        table.insert(target, target);
        for descendant in tree.iter().filter(|s| s.is_descendant_of(structure.id)) {
            table.insert(descendant.id, target);
        }
    }
    table
}

/// Relabel a whole annotation volume with `table`.
pub fn remap_volume(annotation: &Array3<u32>, table: &AHashMap<RegionId, RegionId>) -> Array3<u32> {
    #[cfg(feature = "parallel")]
    {
        let mut out = Array3::<u32>::zeros(annotation.raw_dim());
        Zip::from(&mut out)
            .and(annotation)
            .par_for_each(|o, a| *o = table.get(a).copied().unwrap_or(0));
        out
    }

    #[cfg(not(feature = "parallel"))]
    {
        annotation.map(|a| table.get(a).copied().unwrap_or(0))
    }
}

#[derive(Debug, Default)]
pub struct RemappedAnnotation {
    cached: RwLock<Option<Arc<Array3<u32>>>>,
}

impl RemappedAnnotation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_computed(&self) -> bool {
        self.cached.read().is_some()
    }

    /// Return the cached volume, computing it first if needed.
    pub fn get_or_compute(
        &self,
        annotation: &Array3<u32>,
        tree: &StructureTree,
        targets: &[RegionId],
    ) -> Arc<Array3<u32>> {
        if let Some(volume) = self.cached.read().as_ref() {
            return Arc::clone(volume);
        }

        let mut guard = self.cached.write();
        // another caller may have filled it while we waited for the write lock
        if let Some(volume) = guard.as_ref() {
            return Arc::clone(volume);
        }

        info!(target: "vvasp-atlas", regions = targets.len(), "Computing remapped annotation");
        let started = Instant::now();
        let table = build_remap_table(tree, targets);
        let volume = Arc::new(remap_volume(annotation, &table));
        info!(
            target: "vvasp-atlas",
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Remapped annotation cached"
        );
        *guard = Some(Arc::clone(&volume));
        volume
    }

    pub fn invalidate(&self) {
        *self.cached.write() = None;
    }
}
