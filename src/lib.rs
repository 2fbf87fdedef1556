//! # VVASP - Volume Visualization and Stereotaxic Planning
//!
//! Probe placement against a 3D brain atlas: positioning multi-shank probes in
//! bregma-relative stereotaxic space, finding where they enter the brain
//! surface, listing the regions each shank crosses, and keeping the plan in
//! experiment files. Rendering and the desktop UI are left to the caller.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! vvasp = "0.3"
//! ```
//!
//! ```rust,no_run
//! use vvasp::prelude::*;
//!
//! let catalogue = ProbeCatalogue::builtin();
//! let mut probe = Probe::new("NP24", &catalogue).unwrap();
//! probe.set_location(Vector3::new(-1500.0, -2000.0, 0.0), Vector3::new(70.0, 0.0, -15.0));
//! probe.move_by(MovementCommand::Advance, 2500.0);
//! println!("tip at {:?}", probe.probe_properties().tip);
//! ```
//!
//! ## Feature Flags
//! - **`parallel`** (default): per-shank region traversal and annotation
//!   remapping on the rayon pool
//! - **`file-logging`**: rolling JSON log files for the tools

pub use vvasp_atlas as atlas;
pub use vvasp_config as config;
pub use vvasp_experiment as experiment;
pub use vvasp_geometry as geometry;
pub use vvasp_observability as observability;
pub use vvasp_probe as probe;
pub use vvasp_structures as structures;

pub mod controls;

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use nalgebra::Vector3;

    pub use crate::atlas::{AtlasProperties, RegionSelection, VvaspAtlas};
    pub use crate::config::{load_config, VvaspConfig};
    pub use crate::controls::MovementControls;
    pub use crate::experiment::{
        load_experiment_file, save_experiment, ExperimentDocument, RestoreContext,
    };
    pub use crate::probe::{
        CustomObject, Probe, ProbeProperties, ShankRegions, SurfaceMesh, TriangleMesh, VizObject,
    };
    pub use crate::structures::{
        MovementCommand, ProbeAngles, ProbeCatalogue, StereotaxicPoint, UnknownDirectionPolicy,
    };
}
