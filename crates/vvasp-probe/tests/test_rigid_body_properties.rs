// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

use nalgebra::Vector3;
use proptest::prelude::*;
use vvasp_probe::{Probe, RigidBody, VizObject};
use vvasp_structures::{MovementCommand, ProbeCatalogue};

fn coordinate() -> impl Strategy<Value = f64> + Clone {
    -8000.0..8000.0f64
}

fn angle() -> impl Strategy<Value = f64> + Clone {
    -180.0..180.0f64
}

fn vector(component: impl Strategy<Value = f64> + Clone) -> impl Strategy<Value = Vector3<f64>> {
    (component.clone(), component.clone(), component).prop_map(|(x, y, z)| Vector3::new(x, y, z))
}

proptest! {
    #[test]
    fn rotation_pivots_about_body_origin(
        origin in vector(coordinate()),
        angles in vector(angle()),
        shift in vector(angle()),
    ) {
        let mut body = RigidBody::new(vec![vec![
            Vector3::new(35.0, 10000.0, 0.0),
            Vector3::new(-35.0, 0.0, 12.0),
        ]]);
        body.set_location(origin, angles);
        let before = body.parts()[0].clone();

        body.rotate_by(shift);
        prop_assert_eq!(body.origin(), origin);
        body.rotate_by(-shift);

        for (a, b) in body.parts()[0].iter().zip(&before) {
            prop_assert!((a - b).norm() < 1e-6, "{:?} vs {:?}", a, b);
        }
    }

    #[test]
    fn set_location_is_idempotent(
        origin in vector(coordinate()),
        angles in vector(angle()),
    ) {
        let mut probe = Probe::new("NP24", &ProbeCatalogue::builtin()).unwrap();
        probe.move_by(MovementCommand::TiltDown, 17.0);
        probe.set_location(origin, angles);
        let first = probe.body().clone();
        probe.set_location(origin, angles);
        prop_assert_eq!(probe.body(), &first);
    }

    #[test]
    fn shank_origins_track_translation(
        origin in vector(coordinate()),
        angles in vector(angle()),
        magnitude in 0.0..5000.0f64,
    ) {
        let mut probe = Probe::new("NP24", &ProbeCatalogue::builtin()).unwrap();
        probe.set_location(origin, angles);
        let before = probe.shank_origins().unwrap();
        probe.move_by(MovementCommand::Anterior, magnitude);
        let after = probe.shank_origins().unwrap();
        for (a, b) in after.iter().zip(&before) {
            prop_assert!((a - b - Vector3::new(0.0, magnitude, 0.0)).norm() < 1e-6);
        }
    }
}
