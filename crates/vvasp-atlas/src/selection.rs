// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

/*!
Which atlas regions are loaded for display and remapping.

A selection is either a named mapping (an explicit acronym list, such as the
Beryl parcellation) or a window of tree depths. The root region is always part
of the selection.
*/

use ahash::AHashSet;
use tracing::warn;

use crate::structures::StructureTree;
use crate::types::{AtlasError, AtlasResult, RegionId};

pub const ROOT_ACRONYM: &str = "root";

#[derive(Debug, Clone, PartialEq)]
pub enum RegionSelection {
    Mapping {
        name: String,
        acronyms: Vec<String>,
    },
    TreeDepth {
        min_tree_depth: usize,
        max_tree_depth: usize,
    },
}

impl RegionSelection {
    /// Build a selection from the optional parameters stored in experiment
    /// documents. Exactly one of `mapping` or the depth pair must be given.
    pub fn from_parameters(
        mapping: Option<(String, Vec<String>)>,
        min_tree_depth: Option<usize>,
        max_tree_depth: Option<usize>,
    ) -> AtlasResult<Self> {
        match (mapping, min_tree_depth, max_tree_depth) {
            (Some((name, acronyms)), None, None) => Ok(RegionSelection::Mapping { name, acronyms }),
            (None, Some(min_tree_depth), Some(max_tree_depth)) => {
                if min_tree_depth > max_tree_depth {
                    return Err(AtlasError::InvalidRegionSelection(format!(
                        "min_tree_depth {} is greater than max_tree_depth {}",
                        min_tree_depth, max_tree_depth
                    )));
                }
                Ok(RegionSelection::TreeDepth {
                    min_tree_depth,
                    max_tree_depth,
                })
            }
            _ => Err(AtlasError::InvalidRegionSelection(
                "specify either min_tree_depth/max_tree_depth or mapping, not both".to_string(),
            )),
        }
    }

    pub fn mapping_name(&self) -> Option<&str> {
        match self {
            RegionSelection::Mapping { name, .. } => Some(name),
            RegionSelection::TreeDepth { .. } => None,
        }
    }

    pub fn tree_depths(&self) -> (Option<usize>, Option<usize>) {
        match self {
            RegionSelection::Mapping { .. } => (None, None),
            RegionSelection::TreeDepth {
                min_tree_depth,
                max_tree_depth,
            } => (Some(*min_tree_depth), Some(*max_tree_depth)),
        }
    }

    /// Structures that remapping relabels to, in application order: later
    /// entries win where subtrees overlap. Root is only included when the
    /// selection itself names it.
    pub fn remap_targets(&self, tree: &StructureTree) -> Vec<RegionId> {
        match self {
            RegionSelection::Mapping { name, acronyms } => acronyms
                .iter()
                .filter_map(|acronym| match tree.get_by_acronym(acronym) {
                    Some(s) => Some(s.id),
                    None => {
                        warn!(target: "vvasp-atlas", mapping = %name, %acronym, "Mapping names a region missing from the atlas");
                        None
                    }
                })
                .collect(),
            RegionSelection::TreeDepth {
                min_tree_depth,
                max_tree_depth,
            } => {
                let mut in_window: Vec<_> = tree
                    .iter()
                    .filter(|s| (*min_tree_depth..=*max_tree_depth).contains(&s.tree_depth()))
                    .collect();
                in_window.sort_by_key(|s| s.tree_depth());
                in_window.into_iter().map(|s| s.id).collect()
            }
        }
    }

    /// Ids of every selected structure, root included.
    pub fn selected_ids(&self, tree: &StructureTree) -> AHashSet<RegionId> {
        let mut ids: AHashSet<RegionId> = self.remap_targets(tree).into_iter().collect();
        if let Some(root) = tree.get_by_acronym(ROOT_ACRONYM) {
            ids.insert(root.id);
        }
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::tests::sample_tree;

    #[test]
    fn test_exactly_one_selection_kind() {
        assert!(RegionSelection::from_parameters(None, None, None).is_err());
        assert!(RegionSelection::from_parameters(
            Some(("Beryl".into(), vec!["CTX".into()])),
            Some(1),
            Some(3)
        )
        .is_err());
        assert!(RegionSelection::from_parameters(None, Some(1), None).is_err());
        assert!(RegionSelection::from_parameters(None, Some(4), Some(2)).is_err());

        let depth = RegionSelection::from_parameters(None, Some(2), Some(3)).unwrap();
        assert_eq!(depth.tree_depths(), (Some(2), Some(3)));
        assert_eq!(depth.mapping_name(), None);
    }

    #[test]
    fn test_root_always_selected() {
        let tree = sample_tree();
        let selection = RegionSelection::Mapping {
            name: "test".into(),
            acronyms: vec!["CTX".into(), "TH".into(), "NOPE".into()],
        };
        let ids = selection.selected_ids(&tree);
        assert_eq!(ids.len(), 3);
        assert!(ids.contains(&997));
        assert_eq!(selection.remap_targets(&tree), vec![688, 549]);
    }

    #[test]
    fn test_tree_depth_window_sorted_shallow_first() {
        let tree = sample_tree();
        let selection = RegionSelection::TreeDepth {
            min_tree_depth: 2,
            max_tree_depth: 4,
        };
        assert_eq!(selection.remap_targets(&tree), vec![8, 688, 549, 985]);
    }
}
