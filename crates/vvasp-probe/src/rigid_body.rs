// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

/*!
RigidBody - position, orientation and the geometry that moves with them.

Geometry is stored in world coordinates and kept equal to
`R · local + origin` at all times. A rotation therefore un-rotates every point
about the body origin with the previous matrix before applying the new one, so
rotations always pivot around the body's own origin.

Angles are `[elevation, spin, azimuth]` in degrees, composed as
`Rz(azimuth) · Rx(elevation) · Ry(spin)`.
*/

use nalgebra::{Matrix3, Vector3};
use tracing::debug;
use vvasp_geometry::{displacement, forward_vector, rotation_matrix_from_angles, vector_from_slice};
use vvasp_structures::{MovementAction, MovementCommand, HOME_ANGLES};

use crate::types::{PartPoints, ProbeResult};

#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    origin: Vector3<f64>,
    angles: Vector3<f64>,
    rotation: Matrix3<f64>,
    parts: Vec<PartPoints>,
    truncate_axis_moves: bool,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl RigidBody {
    /// A body at the world origin with zero angles. `parts` are given in the
    /// body's local frame, which at this point coincides with the world frame.
    pub fn new(parts: Vec<PartPoints>) -> Self {
        Self {
            origin: Vector3::zeros(),
            angles: Vector3::zeros(),
            rotation: Matrix3::identity(),
            parts,
            truncate_axis_moves: true,
        }
    }

    /// Whether advance/retract displacements are truncated to whole µm
    /// (on by default).
    pub fn with_axis_move_truncation(mut self, truncate: bool) -> Self {
        self.truncate_axis_moves = truncate;
        self
    }

    pub fn origin(&self) -> Vector3<f64> {
        self.origin
    }

    pub fn angles(&self) -> Vector3<f64> {
        self.angles
    }

    pub fn rotation_matrix(&self) -> &Matrix3<f64> {
        &self.rotation
    }

    /// World-space points of every geometry part.
    pub fn parts(&self) -> &[PartPoints] {
        &self.parts
    }

    /// The long forward ray of the body, `R · [0, 10000, 0]`.
    pub fn forward(&self) -> Vector3<f64> {
        self.rotation * forward_vector()
    }

    /// Map a point from the body frame into the world.
    pub fn to_world(&self, local: &Vector3<f64>) -> Vector3<f64> {
        self.rotation * local + self.origin
    }

    /// Absolute placement: rotate to `angles`, then translate to `origin`.
    pub fn set_location(&mut self, origin: Vector3<f64>, angles: Vector3<f64>) {
        self.rotate_to(angles);
        self.move_to(origin);
    }

    /// Slice form of [`Self::set_location`]; both slices must have exactly 3 values.
    pub fn set_location_from_slices(&mut self, origin: &[f64], angles: &[f64]) -> ProbeResult<()> {
        let origin = vector_from_slice("origin", origin)?;
        let angles = vector_from_slice("angles", angles)?;
        self.set_location(origin, angles);
        Ok(())
    }

    pub fn translate(&mut self, shift: Vector3<f64>) {
        self.origin += shift;
        self.shift_parts(&shift);
        debug!(target: "vvasp-probe", origin = ?self.origin.as_slice(), "Body translated");
    }

    /// Absolute move. The origin is set to `origin` exactly rather than
    /// accumulated, so repeated placement does not drift.
    pub fn move_to(&mut self, origin: Vector3<f64>) {
        let shift = origin - self.origin;
        self.origin = origin;
        self.shift_parts(&shift);
    }

    pub fn rotate_by(&mut self, angle_shift: Vector3<f64>) {
        let angles = self.angles + angle_shift;
        self.apply_rotation(angles);
        debug!(target: "vvasp-probe", angles = ?self.angles.as_slice(), "Body rotated");
    }

    pub fn rotate_to(&mut self, angles: Vector3<f64>) {
        self.apply_rotation(angles);
    }

    /// Apply one movement command scaled by `magnitude` (µm or degrees).
    pub fn apply(&mut self, command: MovementCommand, magnitude: f64) {
        match command.action() {
            MovementAction::Translate(unit) => self.translate(Vector3::from(unit) * magnitude),
            MovementAction::Rotate(unit) => self.rotate_by(Vector3::from(unit) * magnitude),
            MovementAction::AlongAxis(sign) => {
                let mut shift = displacement(magnitude, self.angles.x, self.angles.z) * sign;
                if self.truncate_axis_moves {
                    shift = shift.map(f64::trunc);
                }
                self.translate(shift);
            }
            MovementAction::Home => {
                self.move_to(Vector3::zeros());
                self.rotate_to(Vector3::from(HOME_ANGLES));
            }
        }
    }

    fn shift_parts(&mut self, shift: &Vector3<f64>) {
        if *shift == Vector3::zeros() {
            return;
        }
        for point in self.parts.iter_mut().flatten() {
            *point += shift;
        }
    }

    fn apply_rotation(&mut self, angles: Vector3<f64>) {
        self.angles = angles;
        let previous = self.rotation;
        let rotation = rotation_matrix_from_angles(&angles);
        if rotation == previous {
            return;
        }
        self.rotation = rotation;
        let relative = rotation * previous.transpose();
        let origin = self.origin;
        for point in self.parts.iter_mut().flatten() {
            *point = relative * (*point - origin) + origin;
        }
    }
}
