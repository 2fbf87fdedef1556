// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Deserializer, Serialize};
use vvasp_structures::{OptionalStereotaxicPoint, ProbeAngles, StereotaxicPoint};

/// Snapshot of a probe as stored in experiment documents.
///
/// `probetype` is the object's display name: the probe type for plain probes,
/// the holder name (e.g. `"NP2 chronic holder - head fixed"`) for holders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeProperties {
    pub probetype: String,
    /// `None` when the record has no `info` key, `Some(None)` for `"info": null`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_present"
    )]
    pub info: Option<Option<String>>,
    #[serde(default = "default_active")]
    pub active: bool,
    pub tip: StereotaxicPoint,
    pub angles: ProbeAngles,
    #[serde(default)]
    pub entrypoint: OptionalStereotaxicPoint,
    #[serde(default)]
    pub depth_along_probe_axis: f64,
}

impl ProbeProperties {
    /// The stored label, if the record carries a non-null one.
    pub fn label(&self) -> Option<&str> {
        self.info.as_ref().and_then(|info| info.as_deref())
    }
}

fn default_active() -> bool {
    true
}

// Only called when the key is present, so a `null` becomes `Some(None)`.
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}
