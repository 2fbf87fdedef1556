// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

/*!
Anatomical coordinate records as they appear in experiment documents.

Positions are bregma relative, in micrometers, along the mediolateral (ML),
anteroposterior (AP) and dorsoventral (DV) axes. Internally everything is an
`[ML, AP, DV]` triple; the keyed forms here exist for the JSON interchange.
*/

use serde::{Deserialize, Serialize};

/// A stereotaxic position `{AP, ML, DV}` in µm.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StereotaxicPoint {
    #[serde(rename = "AP")]
    pub ap: f64,
    #[serde(rename = "ML")]
    pub ml: f64,
    #[serde(rename = "DV")]
    pub dv: f64,
}

impl StereotaxicPoint {
    pub fn new(ml: f64, ap: f64, dv: f64) -> Self {
        Self { ap, ml, dv }
    }

    pub fn from_ml_ap_dv(xyz: [f64; 3]) -> Self {
        Self::new(xyz[0], xyz[1], xyz[2])
    }

    pub fn to_ml_ap_dv(self) -> [f64; 3] {
        [self.ml, self.ap, self.dv]
    }
}

/// Entry point record; every field is `null` when the probe misses the surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OptionalStereotaxicPoint {
    #[serde(rename = "AP")]
    pub ap: Option<f64>,
    #[serde(rename = "ML")]
    pub ml: Option<f64>,
    #[serde(rename = "DV")]
    pub dv: Option<f64>,
}

impl OptionalStereotaxicPoint {
    pub fn into_point(self) -> Option<StereotaxicPoint> {
        match (self.ml, self.ap, self.dv) {
            (Some(ml), Some(ap), Some(dv)) => Some(StereotaxicPoint::new(ml, ap, dv)),
            _ => None,
        }
    }
}

impl From<Option<[f64; 3]>> for OptionalStereotaxicPoint {
    fn from(value: Option<[f64; 3]>) -> Self {
        match value {
            Some([ml, ap, dv]) => Self {
                ap: Some(ap),
                ml: Some(ml),
                dv: Some(dv),
            },
            None => Self::default(),
        }
    }
}

/// Probe orientation in degrees.
///
/// The internal angle vector order is `[elevation, spin, azimuth]`
/// (rotations about x, y and z respectively).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProbeAngles {
    pub elevation: f64,
    pub azimuth: f64,
    pub spin: f64,
}

impl ProbeAngles {
    pub fn new(elevation: f64, spin: f64, azimuth: f64) -> Self {
        Self {
            elevation,
            azimuth,
            spin,
        }
    }

    pub fn from_angle_vector(angles: [f64; 3]) -> Self {
        Self::new(angles[0], angles[1], angles[2])
    }

    pub fn to_angle_vector(self) -> [f64; 3] {
        [self.elevation, self.spin, self.azimuth]
    }
}
