// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

/*!
VizObject - the capability every positioned scene object shares.

Implementors own a [`RigidBody`] and describe their geometry; placement and
movement are provided on top of that. Objects that derive state from their
position (a probe's entry point) refresh it in [`VizObject::on_moved`], which
runs after every placement or movement.
*/

use nalgebra::Vector3;
use tracing::warn;
use vvasp_structures::{MovementCommand, UnknownDirectionPolicy};

use crate::rigid_body::RigidBody;
use crate::types::{PartPoints, ProbeError, ProbeResult};

pub trait VizObject {
    /// Display name of the object type
    fn name(&self) -> &str;

    fn body(&self) -> &RigidBody;

    fn body_mut(&mut self) -> &mut RigidBody;

    /// Geometry parts in the object's local frame, before any placement.
    fn create_geometry(&self) -> Vec<PartPoints>;

    fn is_active(&self) -> bool;

    fn set_active(&mut self, active: bool);

    /// Free-form label (the user's note for this object)
    fn info(&self) -> Option<&str>;

    /// Called after the body has been placed or moved.
    fn on_moved(&mut self) {}

    /// Per-shank origins in world coordinates; `None` for objects without shanks.
    fn shank_origins(&self) -> Option<Vec<Vector3<f64>>> {
        None
    }

    fn origin(&self) -> Vector3<f64> {
        self.body().origin()
    }

    /// `[elevation, spin, azimuth]` in degrees
    fn angles(&self) -> Vector3<f64> {
        self.body().angles()
    }

    fn set_location(&mut self, origin: Vector3<f64>, angles: Vector3<f64>) {
        self.body_mut().set_location(origin, angles);
        self.on_moved();
    }

    fn set_location_from_slices(&mut self, origin: &[f64], angles: &[f64]) -> ProbeResult<()> {
        self.body_mut().set_location_from_slices(origin, angles)?;
        self.on_moved();
        Ok(())
    }

    fn move_by(&mut self, command: MovementCommand, magnitude: f64) {
        self.body_mut().apply(command, magnitude);
        self.on_moved();
    }

    /// Move by a textual direction such as `"tilt up"`. Unknown names are
    /// ignored or rejected according to `policy`.
    fn move_by_name(
        &mut self,
        direction: &str,
        magnitude: f64,
        policy: UnknownDirectionPolicy,
    ) -> ProbeResult<()> {
        match direction.parse::<MovementCommand>() {
            Ok(command) => {
                self.move_by(command, magnitude);
                Ok(())
            }
            Err(_) => match policy {
                UnknownDirectionPolicy::Ignore => {
                    warn!(target: "vvasp-probe", %direction, "Ignoring unknown movement direction");
                    Ok(())
                }
                UnknownDirectionPolicy::Reject => Err(ProbeError::UnknownDirection(direction.to_string())),
            },
        }
    }

    fn make_active(&mut self) {
        self.set_active(true);
    }

    fn make_inactive(&mut self) {
        self.set_active(false);
    }
}
