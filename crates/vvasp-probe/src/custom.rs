// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

/*!
User-supplied scene objects (cranial implants, headplates, ...).

The vertices come from the caller's own mesh files. They are scaled to µm,
shifted so the desired pivot sits at the origin, and reoriented by rotating
about x, then y, then z.
*/

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use vvasp_geometry::rotation_matrix_with_order;
use vvasp_structures::AxisOrder;

use crate::rigid_body::RigidBody;
use crate::types::PartPoints;
use crate::viz_object::VizObject;

/// How a user mesh is brought into the scene frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshTransformation {
    pub scale_factor: f64,
    /// Translation applied after scaling (µm)
    pub mesh_origin: [f64; 3],
    /// `[x, y, z]` degrees, applied in that order
    pub mesh_rotation: [f64; 3],
}

impl Default for MeshTransformation {
    fn default() -> Self {
        Self {
            scale_factor: 1000.0,
            mesh_origin: [0.0; 3],
            mesh_rotation: [0.0; 3],
        }
    }
}

impl MeshTransformation {
    pub fn apply(&self, vertices: &[Vector3<f64>]) -> PartPoints {
        let [x, y, z] = self.mesh_rotation;
        let rotation = rotation_matrix_with_order(x, y, z, AxisOrder::XYZ);
        let origin = Vector3::from(self.mesh_origin);
        vertices
            .iter()
            .map(|v| rotation * (v * self.scale_factor + origin))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct CustomObject {
    name: String,
    meshes: Vec<PartPoints>,
    transformation: MeshTransformation,
    body: RigidBody,
    active: bool,
    info: Option<String>,
}

impl CustomObject {
    /// `meshes` holds the raw vertices of each mesh file making up the object.
    pub fn new(name: impl Into<String>, meshes: Vec<PartPoints>, transformation: MeshTransformation) -> Self {
        let mut object = Self {
            name: name.into(),
            meshes,
            transformation,
            body: RigidBody::default(),
            active: true,
            info: None,
        };
        object.body = RigidBody::new(object.create_geometry());
        object
    }

    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = Some(info.into());
        self
    }

    pub fn transformation(&self) -> &MeshTransformation {
        &self.transformation
    }

    /// World-space vertices of each mesh
    pub fn mesh_points(&self) -> &[PartPoints] {
        self.body.parts()
    }
}

impl VizObject for CustomObject {
    fn name(&self) -> &str {
        &self.name
    }

    fn body(&self) -> &RigidBody {
        &self.body
    }

    fn body_mut(&mut self) -> &mut RigidBody {
        &mut self.body
    }

    fn create_geometry(&self) -> Vec<PartPoints> {
        self.meshes
            .iter()
            .map(|mesh| self.transformation.apply(mesh))
            .collect()
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn info(&self) -> Option<&str> {
        self.info.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vvasp_structures::MovementCommand;

    #[test]
    fn test_default_transformation_scales_mm() {
        let object = CustomObject::new(
            "headplate",
            vec![vec![Vector3::new(1.0, 2.0, 3.0)]],
            MeshTransformation::default(),
        );
        assert_eq!(object.mesh_points()[0][0], Vector3::new(1000.0, 2000.0, 3000.0));
        assert!(object.shank_origins().is_none());
    }

    #[test]
    fn test_rotation_order_x_then_z() {
        let transformation = MeshTransformation {
            scale_factor: 1.0,
            mesh_origin: [0.0, -1.0, 0.0],
            mesh_rotation: [90.0, 0.0, 90.0],
        };
        let points = transformation.apply(&[Vector3::new(0.0, 2.0, 0.0)]);
        // (0,1,0) -> x90 -> (0,0,1) -> z90 stays on z
        assert!((points[0] - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn test_moves_like_any_object() {
        let mut object = CustomObject::new(
            "window",
            vec![vec![Vector3::zeros()], vec![Vector3::new(0.5, 0.0, 0.0)]],
            MeshTransformation::default(),
        )
        .with_info("5mm");
        object.move_by(MovementCommand::Posterior, 100.0);
        assert_eq!(object.mesh_points()[0][0], Vector3::new(0.0, -100.0, 0.0));
        assert_eq!(object.mesh_points()[1][0], Vector3::new(500.0, -100.0, 0.0));
        object.move_by(MovementCommand::Home, 0.0);
        assert_eq!(object.origin(), Vector3::zeros());
        assert_eq!(object.info(), Some("5mm"));
    }

    #[test]
    fn test_serde_defaults() {
        let t: MeshTransformation = serde_json::from_str(r#"{"mesh_rotation": [0, 0, 90]}"#).unwrap();
        assert_eq!(t.scale_factor, 1000.0);
        assert_eq!(t.mesh_rotation, [0.0, 0.0, 90.0]);
    }
}
