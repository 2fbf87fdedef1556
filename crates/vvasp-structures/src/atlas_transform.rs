// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::AxisOrder;

/// How an atlas is placed in bregma-relative stereotaxic space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtlasTransformation {
    /// Bregma in atlas voxel coordinates
    pub bregma_location: [f64; 3],
    /// `[x, y, z]` rotation in degrees, composed with `rotation_order`
    pub angles: [f64; 3],
    #[serde(default = "unit_scaling")]
    pub scaling: [f64; 3],
    #[serde(default)]
    pub rotation_order: AxisOrder,
}

fn unit_scaling() -> [f64; 3] {
    [1.0, 1.0, 1.0]
}

impl AtlasTransformation {
    pub fn new(bregma_location: [f64; 3], angles: [f64; 3]) -> Self {
        Self {
            bregma_location,
            angles,
            scaling: unit_scaling(),
            rotation_order: AxisOrder::XYZ,
        }
    }
}

/// Default placement of the atlases VVASP ships settings for.
///
/// The small negative spin corrects for the pitch of each atlas volume
/// relative to the skull-flat plane.
pub fn builtin_atlas_transformations() -> BTreeMap<String, AtlasTransformation> {
    BTreeMap::from([
        (
            "allen_mouse_25um".to_string(),
            AtlasTransformation::new([216.0, 18.0, 228.0], [90.0, -5.0, 90.0]),
        ),
        (
            "whs_sd_rat_39um".to_string(),
            AtlasTransformation::new([371.0, 72.0, 266.0], [90.0, -4.0, 90.0]),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_defaults() {
        let builtin = builtin_atlas_transformations();
        let allen = &builtin["allen_mouse_25um"];
        assert_eq!(allen.bregma_location, [216.0, 18.0, 228.0]);
        assert_eq!(allen.angles, [90.0, -5.0, 90.0]);
        assert_eq!(allen.scaling, [1.0, 1.0, 1.0]);
        assert_eq!(allen.rotation_order, AxisOrder::XYZ);
        assert_eq!(builtin["whs_sd_rat_39um"].angles, [90.0, -4.0, 90.0]);
    }

    #[test]
    fn test_optional_fields_default() {
        let t: AtlasTransformation = toml::from_str(
            r#"
            bregma_location = [1.0, 2.0, 3.0]
            angles = [0.0, 0.0, 0.0]
            "#,
        )
        .unwrap();
        assert_eq!(t.scaling, [1.0, 1.0, 1.0]);
        assert_eq!(t.rotation_order, AxisOrder::XYZ);
    }
}
