// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

/*!
# VVASP Probe

Positioned scene objects for stereotaxic planning.

## Modules

- **rigid_body**: origin, angles and world-space geometry that moves rigidly
- **viz_object**: the shared object capability (placement, movement, active state)
- **probe**: multi-shank probes, entry point and depth against a brain surface
- **holder**: Neuropixels chronic holders carried by a probe
- **custom**: user-supplied meshes
- **surface**: ray intersection with a triangulated brain surface
- **intersections**: per-shank region traversal through an atlas
- **properties**: the probe record stored in experiment documents

Movement is immediate and synchronous. Region traversal is the expensive
operation and is never run implicitly; call
[`Probe::compute_region_intersections`] when the result is needed.
*/

pub mod custom;
pub mod holder;
pub mod intersections;
pub mod probe;
pub mod properties;
pub mod rigid_body;
pub mod surface;
pub mod types;
pub mod viz_object;

pub use custom::{CustomObject, MeshTransformation};
pub use holder::{ChassisType, ChronicHolder, HOLDER_SCALE_FACTOR, MESH_MAPPING};
pub use intersections::{trace_regions, ShankRegions};
pub use probe::{select_entry_point, Probe, ENTRY_APPROACH_HEIGHT_UM, SURFACE_SEARCH_DEPTH_UM};
pub use properties::ProbeProperties;
pub use rigid_body::RigidBody;
pub use surface::{SurfaceMesh, TriangleMesh};
pub use types::{PartPoints, ProbeError, ProbeResult};
pub use viz_object::VizObject;
