// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

/*!
Axis-order strings used when composing elementary rotations.

An order such as `"xyz"` names the three elementary rotations in the order
they are listed by the caller. How the order maps onto a matrix product is
defined by the rotation code in `vvasp-geometry`; this type only guarantees
the string is a permutation of the three axes.
*/

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::VvaspDataError;

/// A single Cartesian axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn as_char(self) -> char {
        match self {
            Axis::X => 'x',
            Axis::Y => 'y',
            Axis::Z => 'z',
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'x' => Some(Axis::X),
            'y' => Some(Axis::Y),
            'z' => Some(Axis::Z),
            _ => None,
        }
    }
}

/// Permutation of the three axes, e.g. `"xyz"` or `"zxy"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AxisOrder([Axis; 3]);

impl AxisOrder {
    /// Order used by the atlas transforms of the bundled atlases.
    pub const XYZ: AxisOrder = AxisOrder([Axis::X, Axis::Y, Axis::Z]);

    pub fn axes(&self) -> [Axis; 3] {
        self.0
    }
}

impl Default for AxisOrder {
    fn default() -> Self {
        AxisOrder::XYZ
    }
}

impl FromStr for AxisOrder {
    type Err = VvaspDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let axes: Vec<Axis> = s.chars().filter_map(Axis::from_char).collect();
        if s.chars().count() != 3 || axes.len() != 3 {
            return Err(VvaspDataError::InvalidAxisOrder(s.to_string()));
        }
        if axes[0] == axes[1] || axes[0] == axes[2] || axes[1] == axes[2] {
            return Err(VvaspDataError::InvalidAxisOrder(s.to_string()));
        }
        Ok(AxisOrder([axes[0], axes[1], axes[2]]))
    }
}

impl Display for AxisOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for axis in self.0 {
            write!(f, "{}", axis.as_char())?;
        }
        Ok(())
    }
}

impl Serialize for AxisOrder {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for AxisOrder {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
