// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

/*!
# VVASP Atlas

The brain atlas that probes are planned against:

- **structures**: region hierarchy from brainglobe `structures.json`
- **metadata**: resolution, orientation and shape, plus atlas discovery
- **selection**: mapping or tree-depth window of loaded regions
- **atlas**: annotation volume in bregma space, region lookup, visible regions
- **remap**: cached annotation relabelled to the selected regions
- **slicing**: 2D annotation slices

Reading the annotation volume itself is left to the caller; the atlas takes
it as an `ndarray::Array3<u32>` with 0 meaning outside the brain.
*/

pub mod atlas;
pub mod metadata;
pub mod remap;
pub mod selection;
pub mod slicing;
pub mod structures;
pub mod types;

pub use atlas::{AtlasProperties, VvaspAtlas};
pub use metadata::{list_available_atlases, read_atlas_files, AtlasMetadata, Section};
pub use remap::RemappedAnnotation;
pub use selection::RegionSelection;
pub use slicing::SlicePlane;
pub use structures::{Structure, StructureTree};
pub use types::{AtlasError, AtlasResult, RegionId, OUTSIDE_ATLAS};
