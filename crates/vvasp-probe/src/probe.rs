// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

/*!
Probe - a multi-shank probe, optionally carried by a chronic holder.

Probe types are data: the shank layout comes from a [`ProbeCatalogue`] entry,
and a holder adds one more rigidly attached part. After every placement the
entry point is recomputed against the brain surface, when one is attached.
*/

use std::sync::Arc;

use nalgebra::Vector3;
use tracing::debug;
use vvasp_geometry::forward_vector;
use vvasp_structures::{
    MovementCommand, OptionalStereotaxicPoint, ProbeAngles, ProbeCatalogue, ProbeGeometry,
    StereotaxicPoint,
};

use crate::holder::{ChassisType, ChronicHolder};
use crate::properties::ProbeProperties;
use crate::rigid_body::RigidBody;
use crate::surface::SurfaceMesh;
use crate::types::{PartPoints, ProbeError, ProbeResult};
use crate::viz_object::VizObject;

/// Height above the requested entry location a probe starts from when driven
/// in from the surface (µm).
pub const ENTRY_APPROACH_HEIGHT_UM: f64 = 1000.0;

/// Downward ray used to find the surface below an entry location (µm).
pub const SURFACE_SEARCH_DEPTH_UM: f64 = 10_000.0;

/// Entry point policy for a set of surface hits: none, the only one, or the
/// first hit with the greatest DV.
pub fn select_entry_point(hits: &[Vector3<f64>]) -> Option<Vector3<f64>> {
    hits.iter()
        .copied()
        .fold(None, |best: Option<Vector3<f64>>, hit| match best {
            Some(b) if b.z >= hit.z => Some(b),
            _ => Some(hit),
        })
}

pub struct Probe {
    probetype: String,
    geometry: ProbeGeometry,
    holder: Option<ChronicHolder>,
    body: RigidBody,
    surface: Option<Arc<dyn SurfaceMesh>>,
    entry_point: Option<Vector3<f64>>,
    active: bool,
    info: Option<String>,
}

impl std::fmt::Debug for Probe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Probe")
            .field("probetype", &self.probetype)
            .field("holder", &self.holder.as_ref().map(|h| h.display_name()))
            .field("origin", &self.body.origin())
            .field("angles", &self.body.angles())
            .field("entry_point", &self.entry_point)
            .field("active", &self.active)
            .finish()
    }
}

impl Probe {
    pub fn new(probetype: &str, catalogue: &ProbeCatalogue) -> ProbeResult<Self> {
        let geometry = catalogue.get(probetype)?.clone();
        Self::build(probetype, geometry, None)
    }

    /// A probe mounted in a chronic holder. `holder_vertices_mm` are the raw
    /// vertices of the holder mesh.
    pub fn with_holder(
        probetype: &str,
        chassis: ChassisType,
        holder_vertices_mm: PartPoints,
        catalogue: &ProbeCatalogue,
    ) -> ProbeResult<Self> {
        let holder = ChronicHolder::new(chassis, probetype, holder_vertices_mm)?;
        let geometry = catalogue.get(probetype)?.clone();
        Self::build(probetype, geometry, Some(holder))
    }

    fn build(probetype: &str, geometry: ProbeGeometry, holder: Option<ChronicHolder>) -> ProbeResult<Self> {
        let mut probe = Self {
            probetype: probetype.to_string(),
            geometry,
            holder,
            body: RigidBody::default(),
            surface: None,
            entry_point: None,
            active: true,
            info: None,
        };
        let mut parts = probe.create_geometry();
        if let Some(holder) = &probe.holder {
            parts.push(holder.local_points()?);
        }
        probe.body = RigidBody::new(parts);
        debug!(
            target: "vvasp-probe",
            probetype,
            shanks = probe.geometry.shank_count(),
            holder = probe.holder.is_some(),
            "Probe created"
        );
        Ok(probe)
    }

    /// Attach the brain surface used for entry points; the entry point is
    /// recomputed immediately.
    pub fn with_surface(mut self, surface: Arc<dyn SurfaceMesh>) -> Self {
        self.set_surface(Some(surface));
        self
    }

    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = Some(info.into());
        self
    }

    pub fn with_axis_move_truncation(mut self, truncate: bool) -> Self {
        self.body = self.body.with_axis_move_truncation(truncate);
        self
    }

    pub fn set_surface(&mut self, surface: Option<Arc<dyn SurfaceMesh>>) {
        self.surface = surface;
        if self.surface.is_none() {
            self.entry_point = None;
        }
        self.update_entry_point();
    }

    pub fn set_info(&mut self, info: Option<String>) {
        self.info = info;
    }

    /// Catalogue probe type, e.g. `NP24a` for an NP2a holder
    pub fn probetype(&self) -> &str {
        &self.probetype
    }

    pub fn geometry(&self) -> &ProbeGeometry {
        &self.geometry
    }

    pub fn holder(&self) -> Option<&ChronicHolder> {
        self.holder.as_ref()
    }

    /// World-space corners of each shank rectangle.
    pub fn shank_rectangles(&self) -> &[PartPoints] {
        &self.body.parts()[..self.geometry.shank_count()]
    }

    /// World-space holder vertices, if the probe has a holder.
    pub fn holder_points(&self) -> Option<&PartPoints> {
        self.holder.as_ref().map(|_| &self.body.parts()[self.geometry.shank_count()])
    }

    pub fn entry_point(&self) -> Option<Vector3<f64>> {
        self.entry_point
    }

    /// Where the entry marker is drawn: the entry point, or the probe origin
    /// when the trajectory misses the surface.
    pub fn entry_marker(&self) -> Vector3<f64> {
        self.entry_point.unwrap_or_else(|| self.body.origin())
    }

    /// Distance from the entry point to the probe origin; 0 without an entry point.
    pub fn depth(&self) -> f64 {
        self.entry_point
            .map(|entry| (self.body.origin() - entry).norm())
            .unwrap_or(0.0)
    }

    /// Crossings of the probe's forward ray with `mesh`, nearest first.
    pub fn ray_trace_intersection(&self, mesh: &dyn SurfaceMesh) -> Vec<Vector3<f64>> {
        let start = self.body.origin();
        let end = start + self.body.forward();
        mesh.ray_trace(&start, &end)
    }

    /// Recompute the entry point against the attached surface. Without a
    /// surface nothing changes.
    pub fn update_entry_point(&mut self) {
        let Some(surface) = self.surface.as_ref() else {
            return;
        };
        let hits = self.ray_trace_intersection(surface.as_ref());
        self.entry_point = select_entry_point(&hits);
        match self.entry_point {
            Some(entry) => debug!(
                target: "vvasp-probe",
                hits = hits.len(),
                entry = ?entry.as_slice(),
                "Entry point updated"
            ),
            None => debug!(target: "vvasp-probe", "Trajectory does not cross the surface"),
        }
    }

    /// Place the probe on the surface below `ml_ap` and advance it `depth` µm
    /// along its axis.
    ///
    /// A `surface` given here replaces the attached one.
    pub fn drive_probe_from_entry(
        &mut self,
        ml_ap: [f64; 2],
        angles: Vector3<f64>,
        depth: f64,
        surface: Option<Arc<dyn SurfaceMesh>>,
    ) -> ProbeResult<()> {
        if surface.is_some() {
            self.surface = surface;
        }
        let surface = self
            .surface
            .clone()
            .ok_or(ProbeError::MissingCollaborator("brain surface mesh"))?;

        let [ml, ap] = ml_ap;
        self.set_location(Vector3::new(ml, ap, ENTRY_APPROACH_HEIGHT_UM), angles);

        let start = self.body.origin();
        let end = start + Vector3::new(0.0, 0.0, -SURFACE_SEARCH_DEPTH_UM);
        let hits = surface.ray_trace(&start, &end);
        let entry = select_entry_point(&hits).ok_or(ProbeError::NoSurfaceIntersection { ml, ap })?;

        self.set_location(entry, angles);
        self.move_by(MovementCommand::Advance, depth);
        Ok(())
    }

    /// Forward ray of the probe, `R · [0, 10000, 0]`
    pub fn forward(&self) -> Vector3<f64> {
        self.body.rotation_matrix() * forward_vector()
    }

    pub fn probe_properties(&self) -> ProbeProperties {
        ProbeProperties {
            probetype: self.name().to_string(),
            info: Some(self.info.clone()),
            active: self.active,
            tip: StereotaxicPoint::from_ml_ap_dv(self.body.origin().into()),
            angles: ProbeAngles::from_angle_vector(self.body.angles().into()),
            entrypoint: OptionalStereotaxicPoint::from(self.entry_point.map(<[f64; 3]>::from)),
            depth_along_probe_axis: self.depth(),
        }
    }
}

impl VizObject for Probe {
    fn name(&self) -> &str {
        match &self.holder {
            Some(holder) => holder.display_name(),
            None => &self.probetype,
        }
    }

    fn body(&self) -> &RigidBody {
        &self.body
    }

    fn body_mut(&mut self) -> &mut RigidBody {
        &mut self.body
    }

    /// One rectangle per shank: `[w,l,0]`, `[w,0,0]`, `[0,0,t]` and the
    /// opposite corner, offset by the shank corner.
    fn create_geometry(&self) -> Vec<PartPoints> {
        self.geometry
            .shanks()
            .map(|shank| {
                let offset = Vector3::from(shank.offset_um);
                let [w, l, t] = shank.dims_um;
                let p0 = Vector3::new(w, l, 0.0) + offset;
                let p1 = Vector3::new(w, 0.0, 0.0) + offset;
                let p2 = Vector3::new(0.0, 0.0, t) + offset;
                vec![p0, p1, p2, p0 + p2 - p1]
            })
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

    fn on_moved(&mut self) {
        self.update_entry_point();
    }

    fn shank_origins(&self) -> Option<Vec<Vector3<f64>>> {
        Some(
            self.geometry
                .shanks()
                .map(|shank| self.body.to_world(&Vector3::from(shank.local_origin())))
                .collect(),
        )
    }
}
