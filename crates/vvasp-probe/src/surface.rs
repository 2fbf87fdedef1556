// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

/*!
Brain-surface ray intersection.

Probes only need one capability from a surface: the points where a segment
crosses it. [`SurfaceMesh`] is that seam; [`TriangleMesh`] is a plain
triangle soup implementation for meshes held in memory. It reads from JSON
as `{"vertices": [[ML, AP, DV], ...], "faces": [[i, j, k], ...]}` in µm.
*/

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::types::{ProbeError, ProbeResult};

const PARALLEL_EPSILON: f64 = 1e-12;

pub trait SurfaceMesh: Send + Sync {
    /// Intersections of the segment `start -> end` with the surface, ordered
    /// from `start`.
    fn ray_trace(&self, start: &Vector3<f64>, end: &Vector3<f64>) -> Vec<Vector3<f64>>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTriangleMesh")]
pub struct TriangleMesh {
    vertices: Vec<Vector3<f64>>,
    faces: Vec<[usize; 3]>,
}

#[derive(Deserialize)]
struct RawTriangleMesh {
    vertices: Vec<Vector3<f64>>,
    faces: Vec<[usize; 3]>,
}

impl TryFrom<RawTriangleMesh> for TriangleMesh {
    type Error = ProbeError;

    fn try_from(raw: RawTriangleMesh) -> ProbeResult<Self> {
        Self::new(raw.vertices, raw.faces)
    }
}

impl TriangleMesh {
    pub fn new(vertices: Vec<Vector3<f64>>, faces: Vec<[usize; 3]>) -> ProbeResult<Self> {
        if let Some(face) = faces.iter().find(|f| f.iter().any(|&i| i >= vertices.len())) {
            return Err(ProbeError::InvalidMesh(format!(
                "face {:?} references a vertex beyond {}",
                face,
                vertices.len()
            )));
        }
        Ok(Self { vertices, faces })
    }

    pub fn vertices(&self) -> &[Vector3<f64>] {
        &self.vertices
    }

    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    /// Möller–Trumbore: segment parameter `t` in `[0, 1]` of the crossing.
    fn intersect_triangle(
        origin: &Vector3<f64>,
        direction: &Vector3<f64>,
        triangle: [&Vector3<f64>; 3],
    ) -> Option<f64> {
        let [v0, v1, v2] = triangle;
        let edge1 = v1 - v0;
        let edge2 = v2 - v0;
        let p = direction.cross(&edge2);
        let det = edge1.dot(&p);
        if det.abs() < PARALLEL_EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;
        let s = origin - v0;
        let u = s.dot(&p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }
        let q = s.cross(&edge1);
        let v = direction.dot(&q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }
        let t = edge2.dot(&q) * inv_det;
        (0.0..=1.0).contains(&t).then_some(t)
    }
}

impl SurfaceMesh for TriangleMesh {
    fn ray_trace(&self, start: &Vector3<f64>, end: &Vector3<f64>) -> Vec<Vector3<f64>> {
        let direction = end - start;
        let mut hits: Vec<f64> = self
            .faces
            .iter()
            .filter_map(|&[a, b, c]| {
                Self::intersect_triangle(
                    start,
                    &direction,
                    [&self.vertices[a], &self.vertices[b], &self.vertices[c]],
                )
            })
            .collect();
        hits.sort_by(f64::total_cmp);
        hits.into_iter().map(|t| start + direction * t).collect()
    }
}
