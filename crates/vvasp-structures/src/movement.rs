// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

/*!
Movement vocabulary for positioned objects.

Directions are anatomical (left/right = ML, anterior/posterior = AP,
dorsal/ventral = DV) for translations and probe-relative for rotations.
The textual names are the ones stored in keybinding tables and typed by
users, so they are kept verbatim (including the spaces).
*/

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::VvaspDataError;

/// Angles an object is sent to by [`MovementCommand::Home`], as
/// `[elevation, spin, azimuth]` in degrees.
pub const HOME_ANGLES: [f64; 3] = [90.0, 0.0, 0.0];

/// A single movement request, scaled by a magnitude (µm or degrees).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovementCommand {
    Left,
    Right,
    Dorsal,
    Ventral,
    Anterior,
    Posterior,
    TiltUp,
    TiltDown,
    RotateLeft,
    RotateRight,
    SpinLeft,
    SpinRight,
    Advance,
    Retract,
    Home,
}

/// What a command does to a rigid body, per unit of magnitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MovementAction {
    /// Translate by this ML/AP/DV unit vector
    Translate([f64; 3]),
    /// Add this `[elevation, spin, azimuth]` unit vector to the angles
    Rotate([f64; 3]),
    /// Move along the object's own driving axis; `+1` retracts, `-1` advances
    AlongAxis(f64),
    /// Absolute reset to the origin with [`HOME_ANGLES`]
    Home,
}

impl MovementCommand {
    pub const ALL: [MovementCommand; 15] = [
        MovementCommand::Left,
        MovementCommand::Right,
        MovementCommand::Dorsal,
        MovementCommand::Ventral,
        MovementCommand::Anterior,
        MovementCommand::Posterior,
        MovementCommand::TiltUp,
        MovementCommand::TiltDown,
        MovementCommand::RotateLeft,
        MovementCommand::RotateRight,
        MovementCommand::SpinLeft,
        MovementCommand::SpinRight,
        MovementCommand::Advance,
        MovementCommand::Retract,
        MovementCommand::Home,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MovementCommand::Left => "left",
            MovementCommand::Right => "right",
            MovementCommand::Dorsal => "dorsal",
            MovementCommand::Ventral => "ventral",
            MovementCommand::Anterior => "anterior",
            MovementCommand::Posterior => "posterior",
            MovementCommand::TiltUp => "tilt up",
            MovementCommand::TiltDown => "tilt down",
            MovementCommand::RotateLeft => "rotate left",
            MovementCommand::RotateRight => "rotate right",
            MovementCommand::SpinLeft => "spin left",
            MovementCommand::SpinRight => "spin right",
            MovementCommand::Advance => "advance",
            MovementCommand::Retract => "retract",
            MovementCommand::Home => "home",
        }
    }

    /// Mapping table from command to primitive body operation.
    pub fn action(&self) -> MovementAction {
        match self {
            MovementCommand::Left => MovementAction::Translate([-1.0, 0.0, 0.0]),
            MovementCommand::Right => MovementAction::Translate([1.0, 0.0, 0.0]),
            MovementCommand::Dorsal => MovementAction::Translate([0.0, 0.0, 1.0]),
            MovementCommand::Ventral => MovementAction::Translate([0.0, 0.0, -1.0]),
            MovementCommand::Anterior => MovementAction::Translate([0.0, 1.0, 0.0]),
            MovementCommand::Posterior => MovementAction::Translate([0.0, -1.0, 0.0]),
            MovementCommand::TiltUp => MovementAction::Rotate([1.0, 0.0, 0.0]),
            MovementCommand::TiltDown => MovementAction::Rotate([-1.0, 0.0, 0.0]),
            MovementCommand::RotateLeft => MovementAction::Rotate([0.0, 0.0, 1.0]),
            MovementCommand::RotateRight => MovementAction::Rotate([0.0, 0.0, -1.0]),
            MovementCommand::SpinLeft => MovementAction::Rotate([0.0, 1.0, 0.0]),
            MovementCommand::SpinRight => MovementAction::Rotate([0.0, -1.0, 0.0]),
            MovementCommand::Retract => MovementAction::AlongAxis(1.0),
            MovementCommand::Advance => MovementAction::AlongAxis(-1.0),
            MovementCommand::Home => MovementAction::Home,
        }
    }

    pub fn is_rotation(&self) -> bool {
        matches!(self.action(), MovementAction::Rotate(_))
    }
}

impl FromStr for MovementCommand {
    type Err = VvaspDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MovementCommand::ALL
            .iter()
            .copied()
            .find(|cmd| cmd.as_str() == s)
            .ok_or_else(|| VvaspDataError::UnknownDirection(s.to_string()))
    }
}

impl Display for MovementCommand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for MovementCommand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MovementCommand {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// What to do with a direction name that is not part of the vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownDirectionPolicy {
    /// Leave the object untouched
    #[default]
    Ignore,
    /// Report an error to the caller
    Reject,
}
