//! The core crate for VVASP. Defines the data types shared by every other crate:
//! anatomical coordinates, orientations, the movement vocabulary and probe shank layouts.

mod anatomy;
mod atlas_transform;
mod axis_order;
mod error;
mod movement;
pub mod probe_geometry;

pub use anatomy::{OptionalStereotaxicPoint, ProbeAngles, StereotaxicPoint};
pub use atlas_transform::{builtin_atlas_transformations, AtlasTransformation};
pub use axis_order::{Axis, AxisOrder};
pub use error::VvaspDataError;
pub use movement::{MovementAction, MovementCommand, UnknownDirectionPolicy, HOME_ANGLES};
pub use probe_geometry::{ProbeCatalogue, ProbeGeometry, ShankGeometry};
